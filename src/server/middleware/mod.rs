//! HTTP middleware implementations
//!
//! - Owner resolution from API keys
//! - Request ID tracking

mod auth;
mod helpers;
mod request_id;

#[cfg(test)]
mod tests;

// Re-export all middleware
pub use auth::{OwnerAuth, OwnerAuthService};
pub use helpers::extract_api_key;
pub use request_id::{RequestIdMiddleware, RequestIdMiddlewareService};
