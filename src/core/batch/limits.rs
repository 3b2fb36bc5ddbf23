//! Submission limits

use crate::storage::database::Database;
use crate::utils::error::{BatchError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Decides whether an owner may submit another request
#[async_trait]
pub trait SubmissionLimiter: Send + Sync + std::fmt::Debug {
    /// `Err(BatchError::Quota)` when `owner` is over the limit
    async fn check(&self, owner: &str) -> Result<()>;
}

/// Caps the number of requests an owner has in `registering` or `live`
#[derive(Debug, Clone)]
pub struct ActiveRequestLimiter {
    db: Arc<Database>,
    max_active: u32,
}

impl ActiveRequestLimiter {
    /// `max_active == 0` disables the limit
    pub fn new(db: Arc<Database>, max_active: u32) -> Self {
        Self { db, max_active }
    }
}

#[async_trait]
impl SubmissionLimiter for ActiveRequestLimiter {
    async fn check(&self, owner: &str) -> Result<()> {
        if self.max_active == 0 {
            return Ok(());
        }

        let active = self.db.count_active_requests(owner).await?;
        if active >= u64::from(self.max_active) {
            info!(owner, active, limit = self.max_active, "Submission rejected by quota");
            return Err(BatchError::quota(format!(
                "At most {} unfinished requests allowed",
                self.max_active
            )));
        }
        Ok(())
    }
}
