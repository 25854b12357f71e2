//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// What a metadata read returns about one object. The payload is not included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectHead {
    pub content_type: Option<String>,
    pub size: u64,
    /// User-defined metadata, keyed without the backend's header prefix
    pub metadata: HashMap<String, String>,
}

impl ObjectHead {
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

/// Storage abstraction trait
///
/// One long-lived instance is shared by every request handler, so implementations
/// must be safe for concurrent calls without external locking.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `storage_key` with its content type and user metadata.
    ///
    /// Objects are written once; the key is expected to be fresh.
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
        metadata: &HashMap<String, String>,
    ) -> StorageResult<()>;

    /// Read an object's metadata without its payload.
    ///
    /// Returns `StorageError::NotFound` when no object exists under the key.
    async fn head(&self, storage_key: &str) -> StorageResult<ObjectHead>;

    /// Generate a presigned/temporary URL for direct access (GET)
    ///
    /// The URL expires `expires_in` after the call. Signing happens locally and
    /// does not check that the object exists.
    async fn get_presigned_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
