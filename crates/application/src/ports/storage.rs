//! Durable key-value storage port
//!
//! Models the browser's local storage: a flat map of string keys to string
//! values that survives restarts.

use async_trait::async_trait;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a valid key-value document.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Port for durable client-side storage.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Reads a value. Returns `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
