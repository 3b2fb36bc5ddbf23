//! Integration tests for hygiene-batch
//!
//! These tests drive the public API against real SQLite databases and a real
//! report directory, without mocking.

pub mod config_tests;
pub mod database_tests;
pub mod lifecycle_tests;
