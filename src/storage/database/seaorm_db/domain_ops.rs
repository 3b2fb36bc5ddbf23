use crate::core::batch::{BatchDomainStatus, DomainJob, DomainResult};
use crate::utils::error::{BatchError, Result};
use crate::utils::generate_id;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, batch_domain};
use super::types::{SeaOrmDatabase, status_strings};

#[derive(Debug, FromQueryResult)]
struct StatusCount {
    status: String,
    count: i64,
}

impl SeaOrmDatabase {
    /// Bulk-create jobs in `waiting` for a registered request
    pub async fn insert_domain_jobs(
        &self,
        request_id: &str,
        domains: &[String],
    ) -> Result<Vec<DomainJob>> {
        debug!(request_id, count = domains.len(), "Inserting domain jobs");

        let txn = self.db.begin().await?;
        let jobs = insert_job_rows(&txn, request_id, domains).await?;
        txn.commit().await?;

        Ok(jobs)
    }

    /// Find a job by its id
    pub async fn find_domain_job(&self, job_id: &str) -> Result<Option<DomainJob>> {
        entities::BatchDomain::find_by_id(job_id)
            .one(&self.db)
            .await?
            .map(DomainJob::try_from)
            .transpose()
    }

    /// Find the job testing `domain` under a request
    pub async fn find_domain_job_by_name(
        &self,
        request_id: &str,
        domain: &str,
    ) -> Result<Option<DomainJob>> {
        entities::BatchDomain::find()
            .filter(batch_domain::Column::BatchRequestId.eq(request_id))
            .filter(batch_domain::Column::Domain.eq(domain))
            .one(&self.db)
            .await?
            .map(DomainJob::try_from)
            .transpose()
    }

    /// All jobs of a request
    pub async fn list_domain_jobs(&self, request_id: &str) -> Result<Vec<DomainJob>> {
        entities::BatchDomain::find()
            .filter(batch_domain::Column::BatchRequestId.eq(request_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(DomainJob::try_from)
            .collect()
    }

    /// Atomically move a job to `to` if it sits in one of `to`'s legal predecessors
    ///
    /// Result payloads are written in the same statement. Returns the number of
    /// rows changed (0 or 1).
    pub async fn update_domain_status(
        &self,
        job_id: &str,
        to: BatchDomainStatus,
        result: Option<&DomainResult>,
    ) -> Result<u64> {
        let predecessors = to.legal_predecessors();
        if predecessors.is_empty() {
            return Ok(0);
        }

        let now = chrono::DateTime::<chrono::FixedOffset>::from(Utc::now());
        let mut update = entities::BatchDomain::update_many()
            .col_expr(batch_domain::Column::Status, Expr::value(to.as_str()))
            .col_expr(batch_domain::Column::UpdatedAt, Expr::value(now));

        if let Some(result) = result {
            if let Some(web) = &result.web {
                update = update.col_expr(
                    batch_domain::Column::WebResult,
                    Expr::value(Some(serde_json::to_string(web)?)),
                );
            }
            if let Some(mail) = &result.mail {
                update = update.col_expr(
                    batch_domain::Column::MailResult,
                    Expr::value(Some(serde_json::to_string(mail)?)),
                );
            }
        }

        let updated = update
            .filter(batch_domain::Column::Id.eq(job_id))
            .filter(batch_domain::Column::Status.is_in(status_strings(predecessors)))
            .exec(&self.db)
            .await?;

        Ok(updated.rows_affected)
    }

    /// Job counts per status of one request, read in a single statement
    pub async fn count_domains_by_status(
        &self,
        request_id: &str,
    ) -> Result<Vec<(BatchDomainStatus, u64)>> {
        let rows = entities::BatchDomain::find()
            .select_only()
            .column(batch_domain::Column::Status)
            .column_as(Expr::col(batch_domain::Column::Id).count(), "count")
            .filter(batch_domain::Column::BatchRequestId.eq(request_id))
            .group_by(batch_domain::Column::Status)
            .into_model::<StatusCount>()
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|row| {
                let status: BatchDomainStatus = row.status.parse().map_err(BatchError::Internal)?;
                Ok((status, u64::try_from(row.count).unwrap_or_default()))
            })
            .collect()
    }
}

/// Insert one `waiting` row per domain on `conn`
pub(super) async fn insert_job_rows<C: ConnectionTrait>(
    conn: &C,
    request_id: &str,
    domains: &[String],
) -> Result<Vec<DomainJob>> {
    let now = chrono::DateTime::<chrono::FixedOffset>::from(Utc::now());
    let jobs: Vec<DomainJob> = domains
        .iter()
        .map(|domain| DomainJob {
            id: generate_id(),
            request_id: request_id.to_string(),
            domain: domain.clone(),
            status: BatchDomainStatus::Waiting,
            web_result: None,
            mail_result: None,
        })
        .collect();

    let models = jobs.iter().map(|job| batch_domain::ActiveModel {
        id: Set(job.id.clone()),
        batch_request_id: Set(job.request_id.clone()),
        domain: Set(job.domain.clone()),
        status: Set(job.status.to_string()),
        web_result: Set(None),
        mail_result: Set(None),
        updated_at: Set(now),
    });

    entities::BatchDomain::insert_many(models)
        .exec_without_returning(conn)
        .await?;

    Ok(jobs)
}
