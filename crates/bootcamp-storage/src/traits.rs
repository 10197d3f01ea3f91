//! Storage abstraction trait

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Every operation addresses a file by its storage key. Writes overwrite
/// whatever the key held before.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Create a directory (and its parents) below the root if missing.
    async fn ensure_dir(&self, prefix: &str) -> StorageResult<()>;

    /// Write `data` at `storage_key`.
    async fn put(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Copy `reader` to `storage_key` until EOF, returning the number of bytes written.
    async fn put_stream(
        &self,
        storage_key: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> StorageResult<u64>;

    /// Read the whole file at `storage_key`.
    async fn get(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete the file at `storage_key`. Deleting a missing file is not an error.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;
}
