//! JSON-file-backed store.
//!
//! The whole keyspace is one JSON object on disk, loaded at open and
//! rewritten after every mutation. Good for a single-node demo deployment;
//! the mutation lock serializes writers so the file never interleaves.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use domains::error::{DomainError, Result};
use domains::ports::KeyValueStore;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::warn;

pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<HashMap<String, Value>>,
}

impl JsonFileStore {
    /// Loads the store file, starting empty when it does not exist yet.
    /// An unreadable or malformed file is logged and discarded rather than
    /// refusing to start; per-key self-healing rebuilds the content.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, Value>>(&raw) {
                Ok(map) => map,
                Err(err) => {
                    warn!(path = %path.display(), %err, "store file is not valid JSON, starting empty");
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                return Err(DomainError::Storage(format!(
                    "failed to read store file {}: {err}",
                    path.display()
                )))
            }
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| {
                    DomainError::Storage(format!(
                        "failed to create store directory {}: {err}",
                        parent.display()
                    ))
                })?;
            }
        }
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    async fn persist(&self, data: &HashMap<String, Value>) -> Result<()> {
        let raw = serde_json::to_string_pretty(data)
            .map_err(|err| DomainError::Storage(format!("failed to serialize store: {err}")))?;
        tokio::fs::write(&self.path, raw).await.map_err(|err| {
            DomainError::Storage(format!(
                "failed to write store file {}: {err}",
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Value) -> Result<()> {
        let mut data = self.data.write().await;
        data.insert(key.to_string(), value);
        self.persist(&data).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut data = self.data.write().await;
        if data.remove(key).is_some() {
            self.persist(&data).await?;
        }
        Ok(())
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>> {
        let data = self.data.read().await;
        let mut keys: Vec<String> = data
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}
