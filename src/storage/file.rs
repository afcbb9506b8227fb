//! File-backed credential store
//!
//! Persists the credential namespace as a single JSON document, the durable
//! mirror for one profile across process restarts.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{OpsGateError, Result};
use crate::storage::traits::CredentialStore;

/// Credential store persisted to a JSON file on disk
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes read-modify-write cycles against the backing file
    io_lock: Mutex<()>,
}

impl FileCredentialStore {
    /// Create a store backed by the given file path.
    /// The file and its parent directory are created lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<HashMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                OpsGateError::StorageError(format!(
                    "corrupt credential file {}: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let body = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }

    // A corrupt document cannot be patched; writers start over from empty
    async fn load_or_reset(&self) -> HashMap<String, String> {
        match self.load().await {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Resetting credential file: {}", e);
                HashMap::new()
            }
        }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.io_lock.lock().await;
        let mut entries = self.load().await?;
        Ok(entries.remove(key))
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.io_lock.lock().await;
        let mut entries = self.load_or_reset().await;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.io_lock.lock().await;
        let mut entries = self.load_or_reset().await;
        entries.remove(key);
        // Rewriting unconditionally also heals a corrupt document
        self.persist(&entries).await
    }
}
