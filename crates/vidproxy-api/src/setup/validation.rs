//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use vidproxy_core::{Config, StorageBackend};

/// Validate critical configuration values
///
/// Hard errors come from [`Config::validate`]; this adds the warnings that
/// should not stop the process.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();

    if is_production && config.storage_backend() == StorageBackend::Memory {
        tracing::warn!("Memory storage backend in production - uploads are lost on restart");
    }

    if is_production && config.cors_origin().starts_with("http://") {
        tracing::warn!(
            cors_origin = %config.cors_origin(),
            "CORS origin uses plain http in production"
        );
    }

    if config.s3_endpoint().is_some_and(|e| e.starts_with("http://")) {
        tracing::warn!("S3_ENDPOINT uses plain http - signed URLs will not be encrypted");
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}
