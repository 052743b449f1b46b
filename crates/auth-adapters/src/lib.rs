//! # Auth Adapters
//!
//! Argon2 implementation of the `PasswordHasher` port. Stored secrets are
//! salted PHC strings; verification failures and unparsable hashes both
//! read as a plain mismatch.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
// The argon2 trait of the same name is only needed for method resolution;
// the unnamed import keeps it from shadowing the domain port.
use argon2::PasswordHasher as _;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use domains::error::{DomainError, Result};
use domains::ports::PasswordHasher;
use tracing::debug;

#[derive(Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| DomainError::Storage(format!("password hashing failed: {err}")))?;
        Ok(hash.to_string())
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self
                .argon2
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok(),
            Err(err) => {
                debug!(%err, "stored password hash is unparsable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("admin123").unwrap();
        assert!(hasher.verify("admin123", &hash));
        assert!(!hasher.verify("admin124", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash("test123").unwrap();
        let second = hasher.hash("test123").unwrap();
        assert_ne!(first, second);
        assert!(hasher.verify("test123", &first));
        assert!(hasher.verify("test123", &second));
    }

    #[test]
    fn test_garbage_hash_reads_as_mismatch() {
        let hasher = Argon2PasswordHasher::new();
        assert!(!hasher.verify("test123", "not-a-phc-string"));
        assert!(!hasher.verify("test123", ""));
    }
}
