//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{BatchError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| BatchError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

/// Build and run the server until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting batch API service");

    let prefix = config.server().api_prefix.clone();
    let server = ServerBuilder::new().with_config(config).build().await?;

    info!("API endpoints:");
    info!("   GET  /health");
    info!("   GET  {}/requests", prefix);
    info!("   POST {}/requests", prefix);
    info!("   GET  {}/requests/{{request_id}}", prefix);
    info!("   GET  {}/requests/{{request_id}}/results", prefix);
    info!("   GET  {}/requests/{{request_id}}/cancel", prefix);
    info!("   GET  {}/metadata/report", prefix);

    server.start().await
}
