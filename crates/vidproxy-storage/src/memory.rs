use crate::attributes::{object_head, put_options};
use crate::keys::{object_path, url_encode_key};
use crate::traits::{ObjectHead, Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::memory::InMemory;
use object_store::Error as ObjectStoreError;
use object_store::{GetOptions, ObjectStore, ObjectStoreExt, PutPayload, Result as ObjectResult};
use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// In-process storage implementation
///
/// Objects live in memory for the lifetime of the process. Presigned URLs take the
/// form `{base_url}/{encoded key}?expires={unix_seconds}` and can be resolved again with
/// [`MemoryStorage::fetch_signed_url`].
#[derive(Clone)]
pub struct MemoryStorage {
    store: Arc<InMemory>,
    base_url: String,
}

impl MemoryStorage {
    /// Create a new MemoryStorage instance
    ///
    /// # Arguments
    /// * `base_url` - Base URL presigned links are rooted at (e.g., "http://localhost:5000/memory")
    pub fn new(base_url: impl Into<String>) -> Self {
        MemoryStorage {
            store: Arc::new(InMemory::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Read an object's payload.
    pub async fn download(&self, storage_key: &str) -> StorageResult<Bytes> {
        let location = object_path(storage_key)?;
        let result: ObjectResult<_> = self.store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(storage_key.to_string()),
            other => StorageError::BackendError(other.to_string()),
        })?;

        result
            .bytes()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))
    }

    /// Resolve a URL minted by [`Storage::get_presigned_url`] the way a client would,
    /// refusing it once it has expired.
    pub async fn fetch_signed_url(&self, url: &str) -> StorageResult<Bytes> {
        let rest = url
            .strip_prefix(&self.base_url)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| StorageError::InvalidKey(format!("Foreign URL: {}", url)))?;
        let (key, query) = rest
            .split_once('?')
            .ok_or_else(|| StorageError::InvalidKey("URL is not signed".to_string()))?;
        let expires_at: u64 = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(name, _)| *name == "expires")
            .and_then(|(_, value)| value.parse().ok())
            .ok_or_else(|| StorageError::InvalidKey("URL is not signed".to_string()))?;

        if unix_now()? >= expires_at {
            return Err(StorageError::InvalidKey("Signed URL has expired".to_string()));
        }

        let key = percent_decode_str(key)
            .decode_utf8()
            .map_err(|e| StorageError::InvalidKey(e.to_string()))?;
        self.download(&key).await
    }

    /// Keys of all stored objects, sorted.
    pub async fn keys(&self) -> StorageResult<Vec<String>> {
        let objects: Vec<_> = self
            .store
            .list(None)
            .try_collect()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;
        let mut keys: Vec<String> = objects
            .into_iter()
            .map(|meta| meta.location.to_string())
            .collect();
        keys.sort();
        Ok(keys)
    }

    /// Number of stored objects.
    pub async fn object_count(&self) -> StorageResult<usize> {
        Ok(self.keys().await?.len())
    }
}

fn unix_now() -> StorageResult<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| StorageError::BackendError(e.to_string()))
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
        metadata: &HashMap<String, String>,
    ) -> StorageResult<()> {
        let size = data.len() as u64;
        let location = object_path(storage_key)?;

        self.store
            .put_opts(
                &location,
                PutPayload::from(data),
                put_options(content_type, metadata),
            )
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        tracing::debug!(
            key = %storage_key,
            size_bytes = size,
            content_type = %content_type,
            "Memory upload successful"
        );

        Ok(())
    }

    async fn head(&self, storage_key: &str) -> StorageResult<ObjectHead> {
        let location = object_path(storage_key)?;
        let options = GetOptions {
            head: true,
            ..Default::default()
        };

        let result: ObjectResult<_> = self.store.get_opts(&location, options).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(storage_key.to_string()),
            other => StorageError::BackendError(other.to_string()),
        })?;

        Ok(object_head(&result))
    }

    async fn get_presigned_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        object_path(storage_key)?;
        let expires_at = unix_now()? + expires_in.as_secs();
        Ok(format!(
            "{}/{}?expires={}",
            self.base_url,
            url_encode_key(storage_key),
            expires_at
        ))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
