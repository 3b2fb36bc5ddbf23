//! Common test utilities for hygiene-batch
//!
//! - Isolated storage per test (SQLite plus a temporary report directory)
//! - Fixtures for domain lists, owners and configuration

pub mod database;
pub mod fixtures;

pub use database::TestStorage;
pub use fixtures::{DomainFactory, config_with_users};
