//! HTTP rendering of errors

use super::types::{BatchError, REPORT_NOT_GENERATED};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl BatchError {
    /// Status code and client-safe message for this error
    ///
    /// Internal detail never leaves the process: anything that is not a
    /// client-side error collapses into a generic server error.
    pub fn client_view(&self) -> (StatusCode, String) {
        match self {
            BatchError::NotFound(_) => (StatusCode::NOT_FOUND, "Unknown request".to_string()),
            BatchError::InvalidUrl(_) => (StatusCode::NOT_FOUND, "Invalid URL".to_string()),
            BatchError::Validation(msg) | BatchError::Quota(msg) | BatchError::NotYetDone(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Bad client request: {}", msg),
            ),
            BatchError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            BatchError::Generation(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Server error: {}", REPORT_NOT_GENERATED),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error".to_string(),
            ),
        }
    }
}

impl ResponseError for BatchError {
    fn status_code(&self) -> StatusCode {
        self.client_view().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, message) = self.client_view();

        let body = ErrorResponse {
            success: false,
            message,
            data: serde_json::Map::new(),
        };

        HttpResponse::build(status_code).json(body)
    }
}

/// Standard error envelope
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub data: serde_json::Map<String, serde_json::Value>,
}
