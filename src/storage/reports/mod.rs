//! Report artifact storage
//!
//! One JSON document per finished request, published atomically.

mod local;
mod types;

// Re-export public types
pub use local::LocalReportStore;
pub use types::{ReportArtifact, ReportStore, report_key};
