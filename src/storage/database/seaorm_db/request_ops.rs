use crate::core::batch::{BatchDomainStatus, BatchRequest, BatchRequestStatus, DomainJob};
use crate::utils::error::{BatchError, Result};
use chrono::Utc;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, batch_domain, batch_request};
use super::domain_ops::insert_job_rows;
use super::types::{SeaOrmDatabase, status_strings};

impl SeaOrmDatabase {
    /// Insert a new batch request row
    pub async fn insert_request(&self, request: &BatchRequest) -> Result<()> {
        debug!(request_id = %request.request_id, owner = %request.owner, "Inserting batch request");
        insert_request_row(&self.db, request).await
    }

    /// Create a request with all of its jobs and publish it as `live`
    ///
    /// The request row starts in `registering`; its jobs and the move to
    /// `live` commit in the same transaction, so readers only ever see the
    /// live request with its full job set. On failure nothing is left behind.
    pub async fn register_request(
        &self,
        request: &BatchRequest,
        domains: &[String],
    ) -> Result<Vec<DomainJob>> {
        if domains.is_empty() {
            return Err(BatchError::validation("No domains to register"));
        }
        debug!(request_id = %request.request_id, count = domains.len(), "Registering batch request");

        let txn = self.db.begin().await?;

        let registering = BatchRequest {
            status: BatchRequestStatus::Registering,
            ..request.clone()
        };
        insert_request_row(&txn, &registering).await?;
        let jobs = insert_job_rows(&txn, &request.request_id, domains).await?;

        let published = entities::BatchRequest::update_many()
            .col_expr(
                batch_request::Column::Status,
                Expr::value(BatchRequestStatus::Live.as_str()),
            )
            .filter(batch_request::Column::RequestId.eq(request.request_id.as_str()))
            .filter(batch_request::Column::Status.eq(BatchRequestStatus::Registering.as_str()))
            .exec(&txn)
            .await?;

        if published.rows_affected != 1 {
            return Err(BatchError::internal(format!(
                "Request {} left registering",
                request.request_id
            )));
        }

        txn.commit().await?;
        Ok(jobs)
    }

    /// Find a request visible to `owner`
    pub async fn find_request(&self, owner: &str, request_id: &str) -> Result<Option<BatchRequest>> {
        entities::BatchRequest::find_by_id(request_id)
            .filter(batch_request::Column::Owner.eq(owner))
            .one(&self.db)
            .await?
            .map(BatchRequest::try_from)
            .transpose()
    }

    /// Find a request regardless of owner (engine and worker side)
    pub async fn find_request_by_id(&self, request_id: &str) -> Result<Option<BatchRequest>> {
        entities::BatchRequest::find_by_id(request_id)
            .one(&self.db)
            .await?
            .map(BatchRequest::try_from)
            .transpose()
    }

    /// Requests newest first, optionally restricted to one owner
    pub async fn list_requests(
        &self,
        owner: Option<&str>,
        limit: Option<u64>,
    ) -> Result<Vec<BatchRequest>> {
        debug!("Listing batch requests for {:?} with limit {:?}", owner, limit);

        let mut query = entities::BatchRequest::find();

        if let Some(owner) = owner {
            query = query.filter(batch_request::Column::Owner.eq(owner));
        }

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        query
            .order_by_desc(batch_request::Column::SubmitDate)
            .order_by_desc(batch_request::Column::RequestId)
            .all(&self.db)
            .await?
            .into_iter()
            .map(BatchRequest::try_from)
            .collect()
    }

    /// Count an owner's requests that are still being worked on
    pub async fn count_active_requests(&self, owner: &str) -> Result<u64> {
        let active = status_strings(&[BatchRequestStatus::Registering, BatchRequestStatus::Live]);

        entities::BatchRequest::find()
            .filter(batch_request::Column::Owner.eq(owner))
            .filter(batch_request::Column::Status.is_in(active))
            .count(&self.db)
            .await
            .map_err(BatchError::Database)
    }

    /// Conditionally move a request to `to`
    ///
    /// Only rows currently in one of `from` are touched; the returned count is
    /// zero when the request was in any other state. `finished_date` is stamped
    /// when `to` is terminal.
    pub async fn transition_request(
        &self,
        request_id: &str,
        from: &[BatchRequestStatus],
        to: BatchRequestStatus,
    ) -> Result<u64> {
        let mut update = entities::BatchRequest::update_many()
            .col_expr(batch_request::Column::Status, Expr::value(to.as_str()));

        if to.is_terminal() {
            update = update.col_expr(
                batch_request::Column::FinishedDate,
                Expr::value(Some(chrono::DateTime::<chrono::FixedOffset>::from(Utc::now()))),
            );
        }

        let result = update
            .filter(batch_request::Column::RequestId.eq(request_id))
            .filter(batch_request::Column::Status.is_in(status_strings(from)))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Force a request and every one of its jobs to `cancelled`
    ///
    /// Both updates run in one transaction and overwrite whatever state the
    /// rows are in. `finished_date` keeps its first value.
    pub async fn cancel_request(&self, request_id: &str) -> Result<u64> {
        let txn = self.db.begin().await?;
        let now = chrono::DateTime::<chrono::FixedOffset>::from(Utc::now());

        entities::BatchRequest::update_many()
            .col_expr(
                batch_request::Column::Status,
                Expr::value(BatchRequestStatus::Cancelled.as_str()),
            )
            .filter(batch_request::Column::RequestId.eq(request_id))
            .exec(&txn)
            .await?;

        entities::BatchRequest::update_many()
            .col_expr(batch_request::Column::FinishedDate, Expr::value(Some(now)))
            .filter(batch_request::Column::RequestId.eq(request_id))
            .filter(batch_request::Column::FinishedDate.is_null())
            .exec(&txn)
            .await?;

        let jobs = entities::BatchDomain::update_many()
            .col_expr(
                batch_domain::Column::Status,
                Expr::value(BatchDomainStatus::Cancelled.as_str()),
            )
            .col_expr(batch_domain::Column::UpdatedAt, Expr::value(now))
            .filter(batch_domain::Column::BatchRequestId.eq(request_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(jobs.rows_affected)
    }

    /// Move a live request to `done` once none of its jobs is still pending
    ///
    /// The pending check is a `NOT EXISTS` filter of the update itself, so the
    /// write lock is taken before anything is read. A concurrent cancel either
    /// lands before (the update matches no `live` row) or after (and
    /// overwrites `done`).
    pub async fn mark_done_if_finished(&self, request_id: &str) -> Result<bool> {
        let pending = status_strings(
            &BatchDomainStatus::ALL
                .iter()
                .filter(|s| !s.is_terminal())
                .collect::<Vec<_>>(),
        );

        let pending_jobs = Query::select()
            .expr(Expr::val(1))
            .from(batch_domain::Entity)
            .and_where(
                Expr::col((batch_domain::Entity, batch_domain::Column::BatchRequestId))
                    .eq(request_id),
            )
            .and_where(
                Expr::col((batch_domain::Entity, batch_domain::Column::Status)).is_in(pending),
            )
            .to_owned();

        let now = chrono::DateTime::<chrono::FixedOffset>::from(Utc::now());
        let result = entities::BatchRequest::update_many()
            .col_expr(
                batch_request::Column::Status,
                Expr::value(BatchRequestStatus::Done.as_str()),
            )
            .col_expr(batch_request::Column::FinishedDate, Expr::value(Some(now)))
            .filter(batch_request::Column::RequestId.eq(request_id))
            .filter(batch_request::Column::Status.eq(BatchRequestStatus::Live.as_str()))
            .filter(Expr::exists(pending_jobs).not())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Record the report key of a `done` request
    pub async fn set_report_file(&self, request_id: &str, key: &str) -> Result<u64> {
        let result = entities::BatchRequest::update_many()
            .col_expr(batch_request::Column::ReportFile, Expr::value(Some(key.to_string())))
            .filter(batch_request::Column::RequestId.eq(request_id))
            .filter(batch_request::Column::Status.eq(BatchRequestStatus::Done.as_str()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

async fn insert_request_row<C: ConnectionTrait>(
    conn: &C,
    request: &BatchRequest,
) -> Result<()> {
    let active_model = batch_request::ActiveModel {
        request_id: Set(request.request_id.clone()),
        owner: Set(request.owner.clone()),
        name: Set(request.name.clone()),
        request_type: Set(request.request_type.to_string()),
        status: Set(request.status.to_string()),
        submit_date: Set(request.submitted_at.into()),
        finished_date: Set(request.finished_at.map(Into::into)),
        report_file: Set(request.report_file.clone()),
    };

    entities::BatchRequest::insert(active_model)
        .exec_without_returning(conn)
        .await
        .map_err(BatchError::Database)?;

    Ok(())
}
