//! Owner-resolving authentication middleware

use crate::config::AuthConfig;
use crate::server::middleware::helpers::extract_api_key;
use crate::server::types::Owner;
use crate::utils::error::BatchError;
use actix_web::HttpMessage;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves the calling account from its API key
///
/// On success an [`Owner`] is placed in the request extensions; unknown or
/// missing keys are answered with 401 before any handler runs.
#[derive(Debug, Clone)]
pub struct OwnerAuth {
    users: Arc<AuthConfig>,
}

impl OwnerAuth {
    pub fn new(users: Arc<AuthConfig>) -> Self {
        Self { users }
    }
}

impl<S, B> Transform<S, ServiceRequest> for OwnerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = OwnerAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OwnerAuthService {
            service,
            users: self.users.clone(),
        }))
    }
}

/// Service implementation for the owner auth middleware
pub struct OwnerAuthService<S> {
    service: S,
    users: Arc<AuthConfig>,
}

impl<S, B> Service<ServiceRequest> for OwnerAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let user = extract_api_key(req.headers()).and_then(|key| self.users.find_by_key(&key));

        let Some(user) = user else {
            warn!(path = %req.path(), "Rejected request without valid API key");
            let error = actix_web::Error::from(BatchError::unauthorized("Invalid API key"));
            return Box::pin(async move { Err(error) });
        };

        debug!(owner = %user.name, path = %req.path(), "Request authenticated");
        req.extensions_mut().insert(Owner {
            name: user.name.clone(),
            admin: user.admin,
        });

        Box::pin(self.service.call(req))
    }
}
