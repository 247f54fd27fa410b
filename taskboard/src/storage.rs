//! Blob storage backends for persisted state
//!
//! A backend maps a string key to one string blob. It knows nothing about
//! the board model; [`Persistence`](crate::persistence::Persistence) does the
//! encoding and decides what a failure means.

use crate::error::{BoardError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use fs2::FileExt;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Key/value store holding one blob per key
#[async_trait]
pub trait StateStorage: Send + Sync {
    /// Read the blob stored under `key`, `None` if nothing was ever written
    async fn read_blob(&self, key: &str) -> Result<Option<String>>;

    /// Store `blob` under `key`, replacing any previous value
    async fn write_blob(&self, key: &str, blob: &str) -> Result<()>;
}

/// Stores each key as `<root>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the blob stored under `key`
    pub fn blob_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }

    /// Path to the lock file
    pub fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }

    /// Try to acquire the exclusive writer lock (non-blocking)
    pub async fn lock(&self) -> Result<StorageLock> {
        fs::create_dir_all(&self.root).await?;

        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.lock_path())?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(StorageLock { file }),
            Err(_) => Err(BoardError::LockBusy),
        }
    }
}

#[async_trait]
impl StateStorage for FileStorage {
    async fn read_blob(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_blob(&self, key: &str, blob: &str) -> Result<()> {
        let path = self.blob_path(key)?;
        let _lock = self.lock().await?;
        atomic_write(&path, blob.as_bytes()).await
    }
}

/// RAII lock guard - releases on drop
pub struct StorageLock {
    file: std::fs::File,
}

impl Drop for StorageLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(BoardError::invalid_value("storage key", "must not be empty"));
    }
    if key.contains(['/', '\\']) || key.starts_with('.') {
        return Err(BoardError::invalid_value(
            "storage key",
            format!("'{}' must be a plain file name", key),
        ));
    }
    Ok(())
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;
    fs::rename(&temp_path, path).await?;

    Ok(())
}

/// In-process storage for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: DashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob, e.g. one written by another producer
    pub fn with_blob(self, key: impl Into<String>, blob: impl Into<String>) -> Self {
        self.blobs.insert(key.into(), blob.into());
        self
    }

    /// Current blob under `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.blobs.get(key).map(|b| b.value().clone())
    }
}

#[async_trait]
impl StateStorage for MemoryStorage {
    async fn read_blob(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    async fn write_blob(&self, key: &str, blob: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
