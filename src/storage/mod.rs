//! Storage layer for the batch service
//!
//! This module provides the relational store for requests and domain jobs, and
//! the artifact store for generated reports.

/// Database storage module
pub mod database;
/// Report artifact storage module
pub mod reports;

use crate::config::StorageConfig;
use crate::utils::error::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Main storage layer that bundles both backends
#[derive(Debug, Clone)]
pub struct StorageLayer {
    /// Database connection pool
    pub database: Arc<database::Database>,
    /// Report artifact store
    pub reports: Arc<dyn reports::ReportStore>,
}

impl StorageLayer {
    /// Create a new storage layer
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing storage layer");

        debug!("Connecting to database");
        let database = Arc::new(database::Database::new(&config.database).await?);

        debug!("Initializing report store");
        let reports: Arc<dyn reports::ReportStore> =
            Arc::new(reports::LocalReportStore::new(&config.reports.local_path).await?);

        info!("Storage layer initialized successfully");
        Ok(Self { database, reports })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        self.database.migrate().await
    }

    /// Health check for both backends
    pub async fn health_check(&self) -> StorageHealthStatus {
        let database = match self.database.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Database health check failed: {}", e);
                false
            }
        };

        let reports = match self.reports.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Report store health check failed: {}", e);
                false
            }
        };

        StorageHealthStatus {
            database,
            reports,
            overall: database && reports,
        }
    }
}

/// Storage health status
#[derive(Debug, Clone, Serialize)]
pub struct StorageHealthStatus {
    /// Database health
    pub database: bool,
    /// Report store health
    pub reports: bool,
    /// Overall health
    pub overall: bool,
}
