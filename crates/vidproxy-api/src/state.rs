//! Application state shared by every handler.

use std::sync::Arc;
use vidproxy_core::Config;
use vidproxy_storage::Storage;

/// Read-only after startup; handlers receive it as `State<Arc<AppState>>`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        Self { config, storage }
    }
}
