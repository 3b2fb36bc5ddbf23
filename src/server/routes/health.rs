//! Health check endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::storage::StorageHealthStatus;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, warn};

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// "healthy" or "unhealthy"
    pub status: Cow<'static, str>,
    /// Check timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Service version
    pub version: Cow<'static, str>,
    /// Per-backend storage health
    pub storage: StorageHealthStatus,
}

/// Health check endpoint
///
/// Answers 200 when both stores respond, 503 otherwise. Needs no API key so
/// that load balancers can probe it.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Health check requested");

    let storage = state.storage.health_check().await;
    let healthy = storage.overall;
    let status = HealthStatus {
        status: Cow::Borrowed(if healthy { "healthy" } else { "unhealthy" }),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        storage,
    };

    if healthy {
        ApiResponse::success(status).to_http_response()
    } else {
        warn!("Health check failed");
        HttpResponse::ServiceUnavailable().json(ApiResponse {
            success: false,
            message: "Storage unavailable".to_string(),
            data: status,
        })
    }
}
