//! Helper functions for middleware

use actix_web::http::header::HeaderMap;

/// Extract the API key presented by the client
///
/// Accepts `Authorization: Bearer <key>`, `Authorization: ApiKey <key>` and
/// `X-API-Key: <key>`, in that order.
pub fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get("authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            let key = auth_str
                .strip_prefix("Bearer ")
                .or_else(|| auth_str.strip_prefix("ApiKey "))
                .map(str::trim);

            if let Some(key) = key.filter(|k| !k.is_empty()) {
                return Some(key.to_string());
            }
        }
    }

    headers
        .get("x-api-key")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
}
