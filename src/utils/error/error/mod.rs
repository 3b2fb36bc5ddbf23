//! Error handling for the batch service
//!
//! This module defines all error types used throughout the service and how they
//! are rendered to API clients.

mod helpers;
mod response;
mod types;

pub use response::ErrorResponse;
pub use types::{BatchError, NOT_YET_DONE, REPORT_NOT_GENERATED, Result};
