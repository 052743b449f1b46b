//! Change-notifying store decorator.
//!
//! The browser original broadcast storage events so other tabs could
//! refresh; here the equivalent is an in-process broadcast channel. Events
//! carry the key only. Subscribers re-read whatever they care about, which
//! keeps last-write-wins semantics intact instead of pretending to solve
//! them.

use std::sync::Arc;

use async_trait::async_trait;
use domains::error::Result;
use domains::ports::KeyValueStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;

/// What happened to the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOp {
    Put,
    Remove,
}

/// Emitted after every successful mutation of the wrapped store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreChange {
    pub key: String,
    pub op: ChangeOp,
}

pub type ChangeSender = broadcast::Sender<StoreChange>;

pub struct NotifyingStore {
    inner: Arc<dyn KeyValueStore>,
    changes: ChangeSender,
}

impl NotifyingStore {
    pub fn new(inner: Arc<dyn KeyValueStore>, changes: ChangeSender) -> Self {
        Self { inner, changes }
    }

    fn publish(&self, key: &str, op: ChangeOp) {
        // A send error only means nobody is subscribed right now.
        let _ = self.changes.send(StoreChange {
            key: key.to_string(),
            op,
        });
    }
}

#[async_trait]
impl KeyValueStore for NotifyingStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: Value) -> Result<()> {
        self.inner.put(key, value).await?;
        self.publish(key, ChangeOp::Put);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key).await?;
        self.publish(key, ChangeOp::Remove);
        Ok(())
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>> {
        self.inner.keys(prefix).await
    }
}
