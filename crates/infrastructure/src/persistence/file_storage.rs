//! File-backed durable storage.
//!
//! All keys live in a single JSON document:
//! ```json
//! {
//!   "schema_version": 1,
//!   "entries": {
//!     "token": "eyJhbGciOi...",
//!     "user": "{\"id\":7,...}"
//!   }
//! }
//! ```
//! Writes go to a sibling temporary file which is then renamed over the
//! document, so a crash never leaves it half-written.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use guesthouse_application::ports::{KeyValueStorage, StorageError};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StorageDocument {
    schema_version: u32,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// Durable key-value storage in a JSON file.
#[derive(Debug)]
pub struct FileKeyValueStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileKeyValueStorage {
    /// Creates a storage over `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        let document: StorageDocument =
            from_json_bytes(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))?;
        if document.schema_version > SCHEMA_VERSION {
            return Err(StorageError::Serialization(format!(
                "unsupported schema version {}",
                document.schema_version
            )));
        }
        Ok(document.entries)
    }

    /// Like [`load`](Self::load), but an unreadable document is discarded.
    async fn load_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.load().await {
            Err(StorageError::Serialization(reason)) => {
                warn!(
                    path = %self.path.display(),
                    reason = %reason,
                    "Discarding unreadable storage document"
                );
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    async fn save(&self, entries: BTreeMap<String, String>) -> Result<(), StorageError> {
        let document = StorageDocument {
            schema_version: SCHEMA_VERSION,
            entries,
        };
        let content = to_json_stable_bytes(&document)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let temp = self.path.with_extension("json.tmp");
        fs::write(&temp, &content).await?;
        fs::rename(&temp, &self.path).await?;
        debug!(path = %self.path.display(), "Storage saved");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStorage for FileKeyValueStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load_for_write().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        match self.load().await {
            Ok(mut entries) => {
                if entries.remove(key).is_some() {
                    self.save(entries).await?;
                }
                Ok(())
            }
            Err(StorageError::Serialization(_)) => {
                let entries = self.load_for_write().await?;
                self.save(entries).await
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_values_survive_a_new_instance() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guesthouse").join("session.json");

        let storage = FileKeyValueStorage::new(&path);
        storage.set("token", "abc").await.unwrap();
        storage.set("user", r#"{"id":7}"#).await.unwrap();

        let reopened = FileKeyValueStorage::new(&path);
        assert_eq!(reopened.get("token").await.unwrap().as_deref(), Some("abc"));
        assert_eq!(
            reopened.get("user").await.unwrap().as_deref(),
            Some(r#"{"id":7}"#)
        );
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileKeyValueStorage::new(dir.path().join("absent.json"));

        assert_eq!(storage.get("token").await.unwrap(), None);
        storage.remove("token").await.unwrap();
        assert!(!storage.path().exists());
    }

    #[tokio::test]
    async fn test_remove_deletes_only_that_key() {
        let dir = TempDir::new().unwrap();
        let storage = FileKeyValueStorage::new(dir.path().join("session.json"));
        storage.set("token", "abc").await.unwrap();
        storage.set("theme", "dark").await.unwrap();

        storage.remove("token").await.unwrap();

        assert_eq!(storage.get("token").await.unwrap(), None);
        assert_eq!(storage.get("theme").await.unwrap().as_deref(), Some("dark"));
        let content = std::fs::read_to_string(storage.path()).unwrap();
        assert!(content.contains("\"schema_version\": 1"));
        assert!(content.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_corrupt_document_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let result = FileKeyValueStorage::new(&path).get("token").await;

        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_corrupt_document_is_replaced_on_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();
        let storage = FileKeyValueStorage::new(&path);

        storage.set("token", "abc").await.unwrap();
        assert_eq!(storage.get("token").await.unwrap().as_deref(), Some("abc"));

        storage.remove("token").await.unwrap();
        assert_eq!(storage.get("token").await.unwrap(), None);

        storage.set("token", "def").await.unwrap();
        assert_eq!(storage.get("token").await.unwrap().as_deref(), Some("def"));
    }

    #[tokio::test]
    async fn test_remove_on_corrupt_document_resets_it() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "garbage").unwrap();
        let storage = FileKeyValueStorage::new(&path);

        storage.remove("user").await.unwrap();

        assert_eq!(storage.get("token").await.unwrap(), None);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"schema_version\": 1"));
    }
}
