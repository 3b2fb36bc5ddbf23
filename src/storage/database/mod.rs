//! Database storage implementation using SeaORM
//!
//! Two tables back the batch lifecycle: `batch_requests` and `batch_domains`.
//! Every status mutation is a conditional update so concurrent writers never
//! race through a read-modify-write window.

/// Database entities module
pub mod entities;
/// Database migration module
pub mod migration;
/// SeaORM database implementation module
pub mod seaorm_db;

// Re-export the main database interface
pub use seaorm_db::SeaOrmDatabase as Database;
pub use seaorm_db::{DatabaseBackendType, DatabaseStats};
