//! Progress accounting over domain jobs

use super::status::BatchDomainStatus;
use super::types::{BatchRequest, Progress};
use crate::config::BatchConfig;
use crate::storage::database::Database;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::debug;

/// Which job states count as finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedPolicy {
    statuses: Vec<BatchDomainStatus>,
}

impl FinishedPolicy {
    /// `done` and `error`
    pub fn reference() -> Self {
        Self {
            statuses: vec![BatchDomainStatus::Done, BatchDomainStatus::Error],
        }
    }

    /// `done`, `error` and `cancelled`
    pub fn including_cancelled() -> Self {
        Self {
            statuses: vec![
                BatchDomainStatus::Done,
                BatchDomainStatus::Error,
                BatchDomainStatus::Cancelled,
            ],
        }
    }

    pub fn from_config(config: &BatchConfig) -> Self {
        if config.count_cancelled_as_finished {
            Self::including_cancelled()
        } else {
            Self::reference()
        }
    }

    pub fn counts(&self, status: BatchDomainStatus) -> bool {
        self.statuses.contains(&status)
    }
}

impl Default for FinishedPolicy {
    fn default() -> Self {
        Self::reference()
    }
}

/// Computes progress on demand, never cached
#[derive(Debug, Clone)]
pub struct ProgressCalculator {
    db: Arc<Database>,
    policy: FinishedPolicy,
}

impl ProgressCalculator {
    pub fn new(db: Arc<Database>, policy: FinishedPolicy) -> Self {
        Self { db, policy }
    }

    /// Finished and total job counts of `request`
    pub async fn progress(&self, request: &BatchRequest) -> Result<Progress> {
        let counts = self.db.count_domains_by_status(&request.request_id).await?;
        let progress = tally(&counts, &self.policy);

        debug!(request_id = %request.request_id, %progress, "Progress computed");
        Ok(progress)
    }
}

/// Fold per-status counts from one snapshot into a [`Progress`]
///
/// Both numbers come from the same rows, so `finished <= total` holds.
pub fn tally(counts: &[(BatchDomainStatus, u64)], policy: &FinishedPolicy) -> Progress {
    counts
        .iter()
        .fold(Progress { finished: 0, total: 0 }, |acc, (status, n)| Progress {
            finished: acc.finished + if policy.counts(*status) { *n } else { 0 },
            total: acc.total + n,
        })
}
