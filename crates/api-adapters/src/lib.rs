//! # api-adapters
//!
//! Delivery adapters for the project services. The `web-axum` feature
//! mounts everything under `/api` as a JSON-over-HTTP surface with an
//! SSE change feed; the services themselves stay transport-agnostic.

#[cfg(feature = "web-axum")]
pub mod web;
