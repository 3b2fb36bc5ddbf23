//! Report generation and cached reads
//!
//! A report is built once per finished request, published to the
//! [`ReportStore`] and afterwards only ever read back. Generation runs on the
//! report queue, never on the request path.

use super::queue::ReportQueue;
use super::status::BatchRequestStatus;
use super::types::{BatchRequest, DomainReport, Report, ReportOutcome};
use crate::storage::database::Database;
use crate::storage::reports::{ReportArtifact, ReportStore};
use crate::utils::error::{BatchError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Builds and publishes report documents
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    db: Arc<Database>,
    store: Arc<dyn ReportStore>,
}

impl ReportGenerator {
    pub fn new(db: Arc<Database>, store: Arc<dyn ReportStore>) -> Self {
        Self { db, store }
    }

    /// Assemble the report of `request` in memory
    pub async fn build(&self, request: &BatchRequest) -> Result<Report> {
        let jobs = self.db.list_domain_jobs(&request.request_id).await?;

        let domains: BTreeMap<String, DomainReport> = jobs
            .into_iter()
            .map(|job| {
                (
                    job.domain,
                    DomainReport {
                        status: job.status,
                        web_result: job.web_result,
                        mail_result: job.mail_result,
                    },
                )
            })
            .collect();

        Ok(Report {
            request: request.to_api(),
            domains,
        })
    }

    /// Serialize a report; equal reports give equal bytes
    pub fn render(report: &Report) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(report)?)
    }

    /// Generate and publish the report of a `done` request
    ///
    /// Safe to run concurrently for the same request: each run writes a
    /// complete document and replaces the artifact in one step. Returns
    /// `None` when there is nothing to generate.
    pub async fn generate(&self, request_id: &str) -> Result<Option<ReportArtifact>> {
        let Some(request) = self.db.find_request_by_id(request_id).await? else {
            warn!(request_id, "Report requested for unknown batch request");
            return Ok(None);
        };

        if request.status != BatchRequestStatus::Done {
            debug!(request_id, status = %request.status, "Request not done, skipping report");
            return Ok(None);
        }

        let report = self.build(&request).await?;
        let content = Self::render(&report)?;
        let artifact = self.store.publish(request_id, &content).await?;

        if self.db.set_report_file(request_id, &artifact.key).await? == 0 {
            // Left the done state while generating (cancelled)
            warn!(request_id, "Request no longer done, report not attached");
            return Ok(None);
        }

        info!(
            request_id,
            key = %artifact.key,
            size = artifact.size,
            domains = report.domains.len(),
            "Report generated"
        );
        Ok(Some(artifact))
    }

    /// Read and decode a published report
    ///
    /// Any failure, missing file or malformed content alike, is a
    /// [`BatchError::Generation`].
    pub async fn load(&self, key: &str) -> Result<Report> {
        let content = self.store.read(key).await.map_err(|e| {
            error!(key, "Failed to read report: {}", e);
            BatchError::generation(e.to_string())
        })?;

        serde_json::from_slice(&content).map_err(|e| {
            error!(key, "Stored report is malformed: {}", e);
            BatchError::generation(e.to_string())
        })
    }
}

/// Serves reports from the artifact store and schedules missing ones
#[derive(Debug, Clone)]
pub struct ReportCache {
    generator: Arc<ReportGenerator>,
    queue: ReportQueue,
}

impl ReportCache {
    pub fn new(generator: Arc<ReportGenerator>, queue: ReportQueue) -> Self {
        Self { generator, queue }
    }

    pub fn queue(&self) -> &ReportQueue {
        &self.queue
    }

    /// Report of `request`, or `Pending` while it is not available
    ///
    /// Never waits for generation. When no artifact exists a generation task
    /// is queued as a side effect.
    pub async fn get_report(&self, request: &BatchRequest) -> Result<ReportOutcome> {
        match (&request.report_file, request.status) {
            (Some(key), BatchRequestStatus::Done) => {
                debug!(request_id = %request.request_id, "Serving cached report");
                Ok(ReportOutcome::Ready(self.generator.load(key).await?))
            }
            (Some(_), _) => Ok(ReportOutcome::Pending),
            (None, _) => {
                self.queue.enqueue(&request.request_id);
                Ok(ReportOutcome::Pending)
            }
        }
    }
}
