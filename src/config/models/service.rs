//! Top-level service configuration

use super::*;
use crate::utils::error::{BatchError, Result};
use serde::{Deserialize, Serialize};

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServiceConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Batch lifecycle configuration
    #[serde(default)]
    pub batch: BatchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Apply `BATCH_*` environment overrides on top of this configuration
    pub fn apply_env(mut self) -> Result<Self> {
        if let Ok(url) = std::env::var("BATCH_DATABASE_URL") {
            self.storage.database.url = url;
        }
        if let Ok(path) = std::env::var("BATCH_REPORTS_PATH") {
            self.storage.reports.local_path = path;
        }
        if let Ok(host) = std::env::var("BATCH_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("BATCH_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| BatchError::Config(format!("Invalid BATCH_PORT: {}", e)))?;
        }
        Ok(self)
    }
}
