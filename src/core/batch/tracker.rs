//! Domain job tracker
//!
//! Owns the per-domain job rows of a batch request. Status writes go through a
//! single conditional update, so the test engine and the cancel cascade can
//! race without losing updates.

use super::status::BatchDomainStatus;
use super::types::{BatchRequest, DomainJob, DomainResult};
use super::validation::ensure_unique_non_empty;
use crate::storage::database::Database;
use crate::utils::error::{BatchError, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Reads and mutates domain jobs
#[derive(Debug, Clone)]
pub struct DomainJobTracker {
    db: Arc<Database>,
}

impl DomainJobTracker {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create one `waiting` job per domain
    pub async fn create_jobs(
        &self,
        request: &BatchRequest,
        domains: &[String],
    ) -> Result<Vec<DomainJob>> {
        ensure_unique_non_empty(domains)?;

        let jobs = self
            .db
            .insert_domain_jobs(&request.request_id, domains)
            .await?;

        info!(
            request_id = %request.request_id,
            count = jobs.len(),
            "Domain jobs created"
        );
        Ok(jobs)
    }

    /// Move a job to `status`, optionally recording the engine's output
    ///
    /// Repeating the job's current status is a no-op. Any other move outside
    /// the legality table is logged and rejected without touching the row.
    pub async fn set_status(
        &self,
        job_id: &str,
        status: BatchDomainStatus,
        result: Option<DomainResult>,
    ) -> Result<DomainJob> {
        let changed = self
            .db
            .update_domain_status(job_id, status, result.as_ref())
            .await?;

        let job = self
            .db
            .find_domain_job(job_id)
            .await?
            .ok_or_else(|| BatchError::not_found(format!("Domain job {}", job_id)))?;

        if changed > 0 {
            debug!(job_id, domain = %job.domain, %status, "Domain job updated");
            return Ok(job);
        }

        if job.status == status {
            debug!(job_id, domain = %job.domain, %status, "Duplicate status update ignored");
            return Ok(job);
        }

        warn!(
            job_id,
            request_id = %job.request_id,
            domain = %job.domain,
            from = %job.status,
            to = %status,
            "Dropping illegal domain status update"
        );
        Err(BatchError::illegal_transition(job.status, status))
    }

    /// Same as [`set_status`](Self::set_status), addressing the job by domain name
    pub async fn set_status_by_domain(
        &self,
        request_id: &str,
        domain: &str,
        status: BatchDomainStatus,
        result: Option<DomainResult>,
    ) -> Result<DomainJob> {
        let job = self
            .db
            .find_domain_job_by_name(request_id, domain)
            .await?
            .ok_or_else(|| {
                BatchError::not_found(format!("Domain {} in request {}", domain, request_id))
            })?;

        self.set_status(&job.id, status, result).await
    }

    /// Every job of a request, in no particular order
    pub async fn list_by_request(&self, request: &BatchRequest) -> Result<Vec<DomainJob>> {
        self.db.list_domain_jobs(&request.request_id).await
    }
}
