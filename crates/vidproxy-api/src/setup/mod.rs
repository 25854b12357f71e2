//! Application setup and initialization
//!
//! Everything main.rs needs before it can serve, kept here so integration
//! tests can build the same router.

pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use vidproxy_core::Config;
use vidproxy_storage::Storage;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_tracing();
    tracing::info!("Configuration loaded and validated successfully");

    let storage = storage::setup_storage(&config).await?;

    build_app(config, storage).await
}

/// Build state and router around an already constructed storage backend.
pub async fn build_app(
    config: Config,
    storage: Arc<dyn Storage>,
) -> Result<(Arc<AppState>, axum::Router)> {
    let state = Arc::new(AppState::new(config, storage));
    let router = routes::setup_routes(&state.config, state.clone()).await?;

    Ok((state, router))
}
