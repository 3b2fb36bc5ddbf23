use crate::core::batch::{
    BatchDomainStatus, BatchRequest, BatchRequestStatus, DomainJob, RequestType,
};
use crate::storage::database::entities::{batch_domain, batch_request};
use crate::utils::error::{BatchError, Result};
use sea_orm::DatabaseConnection;

/// SeaORM-based database implementation
#[derive(Debug)]
pub struct SeaOrmDatabase {
    pub(super) db: DatabaseConnection,
    /// Backend type indicator
    pub(super) backend_type: DatabaseBackendType,
}

/// Database backend type indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackendType {
    PostgreSQL,
    SQLite,
}

/// Row counts for the administrative overview
#[derive(Debug, Clone, Default)]
pub struct DatabaseStats {
    /// Total number of batch requests
    pub total_requests: u64,
    /// Total number of domain jobs
    pub total_domains: u64,
}

impl TryFrom<batch_request::Model> for BatchRequest {
    type Error = BatchError;

    fn try_from(model: batch_request::Model) -> Result<Self> {
        let status: BatchRequestStatus = model.status.parse().map_err(BatchError::Internal)?;
        let request_type: RequestType = model.request_type.parse().map_err(BatchError::Internal)?;

        Ok(BatchRequest {
            request_id: model.request_id,
            owner: model.owner,
            name: model.name,
            request_type,
            status,
            submitted_at: model.submit_date.with_timezone(&chrono::Utc),
            finished_at: model.finished_date.map(|t| t.with_timezone(&chrono::Utc)),
            report_file: model.report_file,
        })
    }
}

impl TryFrom<batch_domain::Model> for DomainJob {
    type Error = BatchError;

    fn try_from(model: batch_domain::Model) -> Result<Self> {
        let status: BatchDomainStatus = model.status.parse().map_err(BatchError::Internal)?;

        Ok(DomainJob {
            id: model.id,
            request_id: model.batch_request_id,
            domain: model.domain,
            status,
            web_result: decode_result(model.web_result)?,
            mail_result: decode_result(model.mail_result)?,
        })
    }
}

fn decode_result(raw: Option<String>) -> Result<Option<serde_json::Value>> {
    raw.map(|text| serde_json::from_str(&text))
        .transpose()
        .map_err(BatchError::from)
}

/// Status strings for a `IN (..)` filter
pub(super) fn status_strings<S: std::fmt::Display>(statuses: &[S]) -> Vec<String> {
    statuses.iter().map(|s| s.to_string()).collect()
}
