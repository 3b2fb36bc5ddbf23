//! Server-side request types

use crate::utils::error::BatchError;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures::future::{Ready, ready};

/// Authenticated caller, resolved by the auth middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    /// Account name, the owner of every request it submits
    pub name: String,
    /// May use the administrative listing
    pub admin: bool,
}

impl FromRequest for Owner {
    type Error = BatchError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Owner>()
                .cloned()
                .ok_or_else(|| BatchError::unauthorized("No authenticated owner")),
        )
    }
}
