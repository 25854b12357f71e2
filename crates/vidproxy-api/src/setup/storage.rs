//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use vidproxy_core::{Config, StorageBackend};
use vidproxy_storage::{create_storage, Storage};

/// Build the process-wide storage handle.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;

    let backend_type = storage.backend_type();
    if backend_type == StorageBackend::S3 {
        tracing::info!(
            backend = %backend_type,
            bucket = %config.s3_bucket(),
            region = config.s3_region().unwrap_or_default(),
            endpoint = config.s3_endpoint().unwrap_or("aws"),
            "Storage initialized"
        );
    } else {
        tracing::warn!(
            backend = %backend_type,
            "Storage initialized; objects are kept in memory and lost on restart"
        );
    }

    Ok(storage)
}
