//! Abstract durable storage interface for session credentials
//!
//! Stands in for a browser profile's local storage: a flat string key/value
//! namespace scoped to one profile. The session store treats it strictly as a
//! mirror; in-memory state wins once initialized.

use async_trait::async_trait;

use crate::error::Result;

/// Durable key/value storage for session credentials
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read a value; `None` when the key is absent
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write or replace a value
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing an absent key is a no-op
    async fn remove(&self, key: &str) -> Result<()>;
}
