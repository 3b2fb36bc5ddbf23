//! Configuration data models
//!
//! This module defines all configuration structures used throughout the service.

pub mod auth;
pub mod batch;
pub mod logging;
pub mod server;
pub mod service;
pub mod storage;

// Re-export all configuration types
pub use auth::*;
pub use batch::*;
pub use logging::*;
pub use server::*;
pub use service::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default route prefix of the batch API
pub fn default_api_prefix() -> String {
    "/api/batch/v2".to_string()
}

/// Default database connection pool size
pub fn default_max_connections() -> u32 {
    10
}

/// Default connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    5
}
