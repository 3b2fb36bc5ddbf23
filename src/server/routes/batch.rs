//! Batch API endpoints

use crate::config::AuthConfig;
use crate::core::batch::{
    AdminRequestSummary, ApiBatchRequest, BatchRequest, RegisterRequest, ReportOutcome,
    RequestDescription,
};
use crate::server::middleware::OwnerAuth;
use crate::server::routes::{ApiResponse, configure_extractors, invalid_url};
use crate::server::state::AppState;
use crate::server::types::Owner;
use crate::utils::error::BatchError;
use actix_web::http::header;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Retired API versions; every path below them is an invalid URL
pub const DEPRECATED_PREFIXES: &[&str] = &["/api/batch/v1.0", "/api/batch/v1.1"];

/// Configure batch routes under `api_prefix`
pub fn configure_routes(cfg: &mut web::ServiceConfig, api_prefix: &str, users: Arc<AuthConfig>) {
    cfg.service(
        web::scope(api_prefix)
            .wrap(OwnerAuth::new(users.clone()))
            .configure(configure_extractors)
            .route("/requests", web::get().to(list_requests))
            .route("/requests", web::post().to(register_request))
            .route("/requests/{request_id}", web::get().to(get_request))
            .route("/requests/{request_id}/results", web::get().to(get_results))
            .route("/requests/{request_id}/cancel", web::get().to(cancel_request))
            .route("/metadata/report", web::get().to(report_metadata))
            .route("/documentation", web::get().to(documentation))
            .route("/admin/requests", web::get().to(admin_requests))
            .default_service(web::to(invalid_url)),
    );

    for prefix in DEPRECATED_PREFIXES {
        cfg.service(
            web::scope(prefix)
                .wrap(OwnerAuth::new(users.clone()))
                .default_service(web::to(invalid_url)),
        );
    }
}

/// `?limit=N` on listings
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u64>,
}

/// `?progress=true` on a single request
#[derive(Debug, Deserialize)]
pub struct DescribeQuery {
    pub progress: Option<String>,
}

impl DescribeQuery {
    fn wants_progress(&self) -> bool {
        self.progress
            .as_deref()
            .is_some_and(|p| p.eq_ignore_ascii_case("true"))
    }
}

#[derive(Debug, Serialize)]
struct RequestList {
    requests: Vec<ApiBatchRequest>,
}

#[derive(Debug, Serialize)]
struct SingleRequest<T> {
    request: T,
}

#[derive(Debug, Serialize)]
struct ReportMetadata {
    report: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct AdminListing {
    requests: Vec<AdminRequestSummary>,
}

/// GET /requests
async fn list_requests(
    state: web::Data<AppState>,
    owner: Owner,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, BatchError> {
    let requests = state.manager.list(&owner.name, query.limit).await?;
    let body = RequestList {
        requests: requests.iter().map(BatchRequest::to_api).collect(),
    };
    Ok(ApiResponse::success(body).to_http_response())
}

/// POST /requests
async fn register_request(
    state: web::Data<AppState>,
    owner: Owner,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, BatchError> {
    let body = body.into_inner();
    let request = state
        .manager
        .register(&owner.name, &body.name, body.request_type, &body.domains)
        .await?;

    Ok(ApiResponse::success(SingleRequest {
        request: request.to_api(),
    })
    .to_http_response())
}

/// GET /requests/{request_id}
async fn get_request(
    state: web::Data<AppState>,
    owner: Owner,
    path: web::Path<String>,
    query: web::Query<DescribeQuery>,
) -> Result<HttpResponse, BatchError> {
    let description: RequestDescription = state
        .manager
        .describe(&owner.name, &path, query.wants_progress())
        .await?;

    Ok(ApiResponse::success(SingleRequest {
        request: description,
    })
    .to_http_response())
}

/// GET /requests/{request_id}/results
async fn get_results(
    state: web::Data<AppState>,
    owner: Owner,
    path: web::Path<String>,
) -> Result<HttpResponse, BatchError> {
    match state.manager.results(&owner.name, &path).await? {
        ReportOutcome::Ready(report) => Ok(ApiResponse::success(report).to_http_response()),
        ReportOutcome::Pending => {
            debug!(request_id = %path, "Results not available yet");
            Err(BatchError::not_yet_done())
        }
    }
}

/// GET /requests/{request_id}/cancel
async fn cancel_request(
    state: web::Data<AppState>,
    owner: Owner,
    path: web::Path<String>,
) -> Result<HttpResponse, BatchError> {
    state.manager.cancel(&owner.name, &path).await?;
    Ok(ApiResponse::empty().to_http_response())
}

/// GET /metadata/report
async fn report_metadata(state: web::Data<AppState>, _owner: Owner) -> HttpResponse {
    ApiResponse::success(ReportMetadata {
        report: state.manager.list_metadata(),
    })
    .to_http_response()
}

/// GET /documentation
async fn documentation(state: web::Data<AppState>, _owner: Owner) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((
            header::LOCATION,
            state.config.batch().documentation_url.as_str(),
        ))
        .finish()
}

/// GET /admin/requests
async fn admin_requests(
    state: web::Data<AppState>,
    owner: Owner,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, BatchError> {
    if !owner.admin {
        return Err(BatchError::unauthorized(format!(
            "{} is not an administrator",
            owner.name
        )));
    }

    let limit = query.limit.filter(|&n| n > 0);
    let requests = state.manager.admin_overview(limit).await?;
    Ok(ApiResponse::success(AdminListing { requests }).to_http_response())
}
