#[cfg(feature = "storage-memory")]
use crate::MemoryStorage;
#[cfg(feature = "storage-s3")]
use crate::{S3Credentials, S3Storage};
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use std::sync::Arc;
use vidproxy_core::Config;

/// Create the storage backend selected by configuration.
///
/// Called once at startup; the returned handle is shared by every request.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let region = config.s3_region().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("AWS_REGION not configured".to_string())
            })?;
            let credentials = match (config.aws_access_key_id(), config.aws_secret_access_key()) {
                (Some(access_key_id), Some(secret_access_key)) => S3Credentials {
                    access_key_id: access_key_id.to_string(),
                    secret_access_key: secret_access_key.to_string(),
                },
                _ => {
                    return Err(StorageError::ConfigError(
                        "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY not configured".to_string(),
                    ))
                }
            };

            let storage = S3Storage::new(
                config.s3_bucket().to_string(),
                region,
                config.s3_endpoint().map(String::from),
                credentials,
            )?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-memory")]
        StorageBackend::Memory => {
            let base_url = format!("http://localhost:{}/memory", config.server_port());
            Ok(Arc::new(MemoryStorage::new(base_url)))
        }

        #[cfg(not(feature = "storage-memory"))]
        StorageBackend::Memory => Err(StorageError::ConfigError(
            "Memory storage backend not available (storage-memory feature not enabled)"
                .to_string(),
        )),
    }
}
