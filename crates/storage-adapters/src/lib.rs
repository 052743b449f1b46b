//! # Storage Adapters
//!
//! `KeyValueStore` implementations: an in-memory map for tests and
//! ephemeral runs, a JSON-file-backed store for the single-node demo
//! deployment, and a decorator that publishes change notifications.

pub mod json_file;
pub mod memory;
pub mod notify;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use notify::{ChangeOp, ChangeSender, NotifyingStore, StoreChange};
