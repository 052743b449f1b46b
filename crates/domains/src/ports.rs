//! # Ports
//!
//! Contracts the adapters implement. Services depend only on these traits,
//! never on a concrete store or hasher.

use async_trait::async_trait;
#[cfg(any(test, feature = "testing"))]
use mockall::automock;
use serde_json::Value;

use crate::error::Result;

/// Persistence contract: a flat JSON document store.
///
/// One `put` or `remove` of one key is the atomic unit. Multi-key flows are
/// plain sequences with no rollback; the last write wins.
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn put(&self, key: &str, value: Value) -> Result<()>;
    /// Removing an absent key is a no-op, not an error.
    async fn remove(&self, key: &str) -> Result<()>;
    /// All keys starting with `prefix`, sorted for deterministic iteration.
    async fn keys(&self, prefix: &str) -> Result<Vec<String>>;
}

/// Credential hashing contract.
#[cfg_attr(any(test, feature = "testing"), automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String>;
    /// False on mismatch and on an unparsable stored hash.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}
