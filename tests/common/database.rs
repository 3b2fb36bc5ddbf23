//! Test storage utilities
//!
//! Every test gets its own database and report directory. The in-memory
//! variant is limited to one connection; the file-backed one allows real
//! concurrent writers.

use hygiene_batch::config::{BatchConfig, DatabaseConfig, ReportStorageConfig, StorageConfig};
use hygiene_batch::core::batch::BatchManager;
use hygiene_batch::storage::StorageLayer;
use hygiene_batch::storage::database::Database;
use std::sync::Arc;
use tempfile::TempDir;

/// Storage layer wrapper that owns its temporary files
#[derive(Debug)]
pub struct TestStorage {
    storage: StorageLayer,
    dir: TempDir,
}

impl TestStorage {
    /// In-memory SQLite, single connection
    pub async fn in_memory() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self::open("sqlite::memory:".to_string(), 1, dir).await
    }

    /// SQLite file in a temp dir, several connections
    pub async fn file_backed() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let url = format!("sqlite://{}/batch.db?mode=rwc", dir.path().display());
        Self::open(url, 4, dir).await
    }

    async fn open(url: String, max_connections: u32, dir: TempDir) -> Self {
        let config = StorageConfig {
            database: DatabaseConfig {
                url,
                max_connections,
                connection_timeout: 5,
            },
            reports: ReportStorageConfig {
                local_path: dir.path().join("reports").to_string_lossy().into_owned(),
            },
        };

        let storage = StorageLayer::new(&config)
            .await
            .expect("Failed to create test storage");
        storage
            .migrate()
            .await
            .expect("Failed to run database migrations");

        Self { storage, dir }
    }

    /// Get the storage layer
    pub fn storage(&self) -> &StorageLayer {
        &self.storage
    }

    /// Get Arc to the underlying database
    pub fn db(&self) -> Arc<Database> {
        Arc::clone(&self.storage.database)
    }

    /// Directory holding published reports
    pub fn reports_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("reports")
    }

    /// Lifecycle manager with the given batch settings
    pub fn manager(&self, config: &BatchConfig) -> BatchManager {
        BatchManager::new(&self.storage, config)
    }
}
