// Module declarations
mod connection;
mod domain_ops;
mod request_ops;
mod types;


// Re-export public types
pub use types::{DatabaseBackendType, DatabaseStats, SeaOrmDatabase};
