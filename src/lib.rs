//! # hygiene-batch
//!
//! Batch API for submitting collections of domains to web or mail hygiene
//! testing, following their progress and fetching one aggregated report per
//! collection.
//!
//! ## Lifecycle
//!
//! A request is registered with its domains and goes `live`. The external test
//! engine reports each domain's outcome through [`BatchManager::record_result`];
//! once every domain is terminal the request becomes `done`, and the first
//! results call queues report generation. Cancelling overrides all of it.
//!
//! ## Service Mode
//!
//! ```rust,no_run
//! use hygiene_batch::{BatchService, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/batch.yaml").await?;
//!     let service = BatchService::new(config).await?;
//!     service.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::batch::{
    BatchDomainStatus, BatchManager, BatchRequest, BatchRequestStatus, DomainResult, Progress,
    Report, ReportOutcome, RequestType,
};
pub use utils::error::{BatchError, Result};

use tracing::info;

/// The batch API service
pub struct BatchService {
    config: Config,
    server: server::HttpServer,
}

impl BatchService {
    /// Create a new service instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating batch service instance");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Lifecycle manager, for feeding test engine updates in-process
    pub fn manager(&self) -> &BatchManager {
        &self.server.state().manager
    }

    /// Run the HTTP server until shutdown
    pub async fn run(self) -> Result<()> {
        info!("Starting batch service");
        info!("Configuration: {:#?}", self.config);

        self.server.start().await
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
