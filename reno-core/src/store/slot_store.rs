use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Durable key-value medium holding opaque text blobs.
///
/// Backends know nothing about what the blobs contain; typed access goes
/// through [`crate::store::Persistence`].
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Returns the stored blob, or `None` when the key was never written or
    /// has been removed.
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the blob under `key`.
    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the blob under `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
