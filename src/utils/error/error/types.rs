//! Error types

use thiserror::Error;

/// Result type alias for the batch service
pub type Result<T> = std::result::Result<T, BatchError>;

/// Main error type for the batch service
#[derive(Error, Debug)]
pub enum BatchError {
    /// Unknown request id, or a request owned by somebody else
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed registration input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Owner is over the submission limit
    #[error("Quota exceeded: {0}")]
    Quota(String),

    /// Status mutation that the legality table forbids
    #[error("Illegal transition from {from} to {to}")]
    IllegalTransition { from: String, to: String },

    /// Report artifact missing or corrupt at read time
    #[error("Report generation error: {0}")]
    Generation(String),

    /// Results requested before the report is available
    #[error("Request not yet done: {0}")]
    NotYetDone(String),

    /// Missing or unknown credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Deprecated or unknown endpoint
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Report store errors
    #[error("Report storage error: {0}")]
    Storage(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Message used whenever a stored report cannot be served
pub const REPORT_NOT_GENERATED: &str = "Report could not be generated.";

/// Message used when results are requested too early
pub const NOT_YET_DONE: &str = "The request is not yet `done`.";
