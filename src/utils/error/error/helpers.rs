//! Helper functions for creating specific error types

use super::types::{BatchError, NOT_YET_DONE};

/// Helper functions for creating specific errors
impl BatchError {
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn quota<S: Into<String>>(message: S) -> Self {
        Self::Quota(message.into())
    }

    pub fn illegal_transition(from: impl std::fmt::Display, to: impl std::fmt::Display) -> Self {
        Self::IllegalTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn generation<S: Into<String>>(message: S) -> Self {
        Self::Generation(message.into())
    }

    pub fn not_yet_done() -> Self {
        Self::NotYetDone(NOT_YET_DONE.to_string())
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn invalid_url<S: Into<String>>(message: S) -> Self {
        Self::InvalidUrl(message.into())
    }

    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}
