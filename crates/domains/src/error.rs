//! # DomainError
//!
//! Centralized error handling for the sitekit ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Resource not found (e.g., Project, Category, Post)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., empty title, oversized upload)
    #[error("validation error: {0}")]
    Validation(String),

    /// Security/Auth failure (e.g., bad credentials, missing session)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource already exists
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure (e.g., store file unwritable)
    #[error("storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Shorthand for the common lookup-miss case.
    pub fn not_found(entity: &str, id: &str) -> Self {
        DomainError::NotFound(entity.to_string(), id.to_string())
    }
}

// Serialization of our own records only fails on infrastructure-grade bugs,
// so it maps to the storage variant rather than a validation error.
impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Storage(format!("serialization failed: {err}"))
    }
}

/// A specialized Result type for sitekit logic.
pub type Result<T> = std::result::Result<T, DomainError>;
