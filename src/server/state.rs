//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::batch::BatchManager;
use crate::storage::StorageLayer;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc so every worker thread shares one copy.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
    /// Batch lifecycle manager
    pub manager: Arc<BatchManager>,
}

impl AppState {
    /// Wire the lifecycle manager over `storage`
    ///
    /// Starts the report workers, so it must run inside a Tokio runtime.
    pub fn new(config: Config, storage: StorageLayer) -> Self {
        let manager = BatchManager::new(&storage, config.batch());
        Self {
            config: Arc::new(config),
            storage: Arc::new(storage),
            manager: Arc::new(manager),
        }
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
