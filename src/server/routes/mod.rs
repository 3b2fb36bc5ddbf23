//! HTTP route modules
//!
//! Batch API routes live under the configured prefix and require an API key;
//! `/health` is public.

pub mod batch;
pub mod health;

use crate::utils::error::BatchError;
use actix_web::{HttpRequest, HttpResponse, web};

/// Standard API response envelope
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Human readable outcome
    pub message: String,
    /// Response payload
    pub data: T,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: "OK".to_string(),
            data,
        }
    }

    /// Convert the API response to an HTTP 200 response
    pub fn to_http_response(&self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}

impl ApiResponse<serde_json::Map<String, serde_json::Value>> {
    /// Successful response with an empty `data` object
    pub fn empty() -> Self {
        Self::success(serde_json::Map::new())
    }
}

/// Answer for retired and unknown endpoints
pub async fn invalid_url(req: HttpRequest) -> Result<HttpResponse, BatchError> {
    Err(BatchError::invalid_url(req.path().to_string()))
}

/// Body and query extractor errors rendered through the standard envelope
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| BatchError::validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| BatchError::validation(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| BatchError::validation(err.to_string()).into()),
    );
}
