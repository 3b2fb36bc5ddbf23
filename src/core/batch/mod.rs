//! Batch request lifecycle
//!
//! A batch request groups many domains for web or mail testing. The external
//! test engine moves each domain job through its states; this module tracks
//! those jobs, derives progress, detects completion, builds the aggregated
//! report off the request path and implements the cancellation cascade.

pub mod limits;
pub mod lifecycle;
pub mod metadata;
pub mod progress;
pub mod queue;
pub mod report;
pub mod status;
pub mod tracker;
pub mod types;
pub mod validation;


pub use limits::{ActiveRequestLimiter, SubmissionLimiter};
pub use lifecycle::{AdminRequestSummary, BatchManager, RequestDescription};
pub use metadata::{ReportMetadataSource, StaticReportMetadata};
pub use progress::{FinishedPolicy, ProgressCalculator};
pub use queue::ReportQueue;
pub use report::{ReportCache, ReportGenerator};
pub use status::{BatchDomainStatus, BatchRequestStatus};
pub use tracker::DomainJobTracker;
pub use types::*;
