//! Batch lifecycle manager
//!
//! Entry point for everything that happens to a batch request: registration,
//! reads, progress, results, cancellation and completion detection. Every
//! operation takes the owner explicitly; a request owned by someone else is
//! reported exactly like one that does not exist.

use super::limits::{ActiveRequestLimiter, SubmissionLimiter};
use super::metadata::{ReportMetadataSource, StaticReportMetadata};
use super::progress::{FinishedPolicy, ProgressCalculator};
use super::queue::ReportQueue;
use super::report::{ReportCache, ReportGenerator};
use super::status::{BatchDomainStatus, BatchRequestStatus};
use super::tracker::DomainJobTracker;
use super::types::{
    ApiBatchRequest, BatchRequest, DomainJob, DomainResult, Progress, ReportOutcome, RequestType,
};
use super::validation::{validate_domains, validate_name};
use crate::config::BatchConfig;
use crate::storage::StorageLayer;
use crate::storage::database::Database;
use crate::utils::error::{BatchError, Result};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Request metadata, optionally with progress
#[derive(Debug, Clone, Serialize)]
pub struct RequestDescription {
    #[serde(flatten)]
    pub request: ApiBatchRequest,
    /// `"<finished>/<total>"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_domains: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_domains: Option<u64>,
}

/// One row of the administrative listing
#[derive(Debug, Clone, Serialize)]
pub struct AdminRequestSummary {
    pub owner: String,
    #[serde(flatten)]
    pub request: ApiBatchRequest,
    pub progress: String,
    pub has_report: bool,
}

/// Orchestrates the batch request lifecycle
#[derive(Debug, Clone)]
pub struct BatchManager {
    db: Arc<Database>,
    tracker: DomainJobTracker,
    progress: ProgressCalculator,
    reports: ReportCache,
    limiter: Arc<dyn SubmissionLimiter>,
    metadata: Arc<dyn ReportMetadataSource>,
    max_domains: usize,
    default_list_limit: u64,
}

impl BatchManager {
    /// Wire the manager over `storage` and start the report workers
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(storage: &StorageLayer, config: &BatchConfig) -> Self {
        let db = storage.database.clone();
        let generator = Arc::new(ReportGenerator::new(db.clone(), storage.reports.clone()));
        let (queue, _workers) =
            ReportQueue::start(generator.clone(), config.report_workers, config.queue_capacity);

        Self {
            tracker: DomainJobTracker::new(db.clone()),
            progress: ProgressCalculator::new(db.clone(), FinishedPolicy::from_config(config)),
            reports: ReportCache::new(generator, queue),
            limiter: Arc::new(ActiveRequestLimiter::new(
                db.clone(),
                config.max_live_requests_per_owner,
            )),
            metadata: Arc::new(StaticReportMetadata),
            max_domains: config.max_domains_per_request,
            default_list_limit: config.default_list_limit,
            db,
        }
    }

    /// Replace the submission limiter
    pub fn with_limiter(mut self, limiter: Arc<dyn SubmissionLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    /// Replace the report metadata source
    pub fn with_metadata(mut self, metadata: Arc<dyn ReportMetadataSource>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn tracker(&self) -> &DomainJobTracker {
        &self.tracker
    }

    pub fn report_queue(&self) -> &ReportQueue {
        self.reports.queue()
    }

    /// Register a new request and its domain jobs
    ///
    /// The request, one `waiting` job per domain and the move from
    /// `registering` to `live` commit together. A failed registration leaves
    /// no request behind.
    pub async fn register(
        &self,
        owner: &str,
        name: &str,
        request_type: RequestType,
        domains: &[String],
    ) -> Result<BatchRequest> {
        validate_name(name)?;
        let domains = validate_domains(domains, self.max_domains)?;
        self.limiter.check(owner).await?;

        let mut request = BatchRequest {
            request_id: Uuid::new_v4().simple().to_string(),
            owner: owner.to_string(),
            name: name.trim().to_string(),
            request_type,
            status: BatchRequestStatus::Registering,
            submitted_at: Utc::now(),
            finished_at: None,
            report_file: None,
        };

        let jobs = self
            .db
            .register_request(&request, &domains)
            .await
            .inspect_err(|e| {
                error!(request_id = %request.request_id, owner, "Registration failed: {}", e);
            })?;
        request.status = BatchRequestStatus::Live;

        info!(
            request_id = %request.request_id,
            owner,
            request_type = %request.request_type,
            domains = jobs.len(),
            "Batch request registered"
        );
        Ok(request)
    }

    /// Fetch a request owned by `owner`
    pub async fn get(&self, owner: &str, request_id: &str) -> Result<BatchRequest> {
        self.db
            .find_request(owner, request_id)
            .await?
            .ok_or_else(|| BatchError::not_found(request_id))
    }

    /// An owner's requests, newest first
    ///
    /// `None` uses the configured page size, `Some(0)` returns everything.
    pub async fn list(&self, owner: &str, limit: Option<u64>) -> Result<Vec<BatchRequest>> {
        let limit = match limit.unwrap_or(self.default_list_limit) {
            0 => None,
            n => Some(n),
        };
        self.db.list_requests(Some(owner), limit).await
    }

    /// Progress of a request owned by `owner`
    pub async fn progress(&self, owner: &str, request_id: &str) -> Result<Progress> {
        let request = self.get(owner, request_id).await?;
        self.progress.progress(&request).await
    }

    /// Request metadata for API clients
    pub async fn describe(
        &self,
        owner: &str,
        request_id: &str,
        include_progress: bool,
    ) -> Result<RequestDescription> {
        let request = self.get(owner, request_id).await?;
        let mut description = RequestDescription {
            request: request.to_api(),
            progress: None,
            num_domains: None,
            total_domains: None,
        };

        if include_progress {
            let progress = self.progress.progress(&request).await?;
            description.progress = Some(progress.to_string());
            description.num_domains = Some(progress.total);
            description.total_domains = Some(progress.total);
        }

        debug!(request_id, owner, include_progress, "Request described");
        Ok(description)
    }

    /// Report of a request, or `Pending` until it is available
    pub async fn results(&self, owner: &str, request_id: &str) -> Result<ReportOutcome> {
        let request = self.get(owner, request_id).await?;
        self.reports.get_report(&request).await
    }

    /// Cancel a request and every one of its jobs
    ///
    /// Overwrites any current state, `done` included, and may be repeated.
    pub async fn cancel(&self, owner: &str, request_id: &str) -> Result<()> {
        let request = self.get(owner, request_id).await?;
        let jobs = self.db.cancel_request(&request.request_id).await?;

        info!(
            request_id,
            owner,
            previous = %request.status,
            jobs,
            "Batch request cancelled"
        );
        Ok(())
    }

    /// Static description of what a report measures
    pub fn list_metadata(&self) -> serde_json::Value {
        self.metadata.report_metadata()
    }

    /// Move a live request to `done` once all of its jobs are terminal
    pub async fn mark_done_if_finished(&self, request_id: &str) -> Result<bool> {
        let done = self.db.mark_done_if_finished(request_id).await?;
        if done {
            info!(request_id, "Batch request done");
        }
        Ok(done)
    }

    /// Record an infrastructure failure for a request still in progress
    pub async fn mark_error(&self, request_id: &str) -> Result<bool> {
        let moved = self
            .db
            .transition_request(
                request_id,
                &[BatchRequestStatus::Registering, BatchRequestStatus::Live],
                BatchRequestStatus::Error,
            )
            .await?;

        if moved > 0 {
            warn!(request_id, "Batch request failed");
        }
        Ok(moved > 0)
    }

    /// Apply a test engine update for one domain and run completion detection
    pub async fn record_result(
        &self,
        request_id: &str,
        domain: &str,
        status: BatchDomainStatus,
        result: Option<DomainResult>,
    ) -> Result<DomainJob> {
        let job = self
            .tracker
            .set_status_by_domain(request_id, domain, status, result)
            .await?;

        if status.is_terminal() {
            self.mark_done_if_finished(request_id).await?;
        }
        Ok(job)
    }

    /// Every request across owners with its progress, read only
    pub async fn admin_overview(&self, limit: Option<u64>) -> Result<Vec<AdminRequestSummary>> {
        let requests = self.db.list_requests(None, limit).await?;
        let mut summaries = Vec::with_capacity(requests.len());

        for request in requests {
            let progress = self.progress.progress(&request).await?;
            summaries.push(AdminRequestSummary {
                owner: request.owner.clone(),
                request: request.to_api(),
                progress: progress.to_string(),
                has_report: request.has_report_file(),
            });
        }
        Ok(summaries)
    }
}
