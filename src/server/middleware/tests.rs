//! Middleware tests

use super::helpers::extract_api_key;
use super::{OwnerAuth, RequestIdMiddleware};
use crate::config::{ApiUserConfig, AuthConfig};
use crate::server::types::Owner;
use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use actix_web::{App, HttpResponse, test, web};
use std::sync::Arc;

fn headers(name: &'static str, value: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    headers
}

fn users() -> Arc<AuthConfig> {
    Arc::new(AuthConfig {
        users: vec![
            ApiUserConfig {
                name: "alice".to_string(),
                api_key: "alice-key".to_string(),
                admin: false,
            },
            ApiUserConfig {
                name: "ops".to_string(),
                api_key: "ops-key".to_string(),
                admin: true,
            },
        ],
    })
}

async fn whoami(owner: Owner) -> HttpResponse {
    HttpResponse::Ok().body(format!("{}:{}", owner.name, owner.admin))
}

#[::core::prelude::v1::test]
fn test_extract_api_key_bearer() {
    let key = extract_api_key(&headers("authorization", "Bearer key123"));
    assert_eq!(key.as_deref(), Some("key123"));
}

#[::core::prelude::v1::test]
fn test_extract_api_key_api_key_scheme() {
    let key = extract_api_key(&headers("authorization", "ApiKey key123"));
    assert_eq!(key.as_deref(), Some("key123"));
}

#[::core::prelude::v1::test]
fn test_extract_api_key_header() {
    let key = extract_api_key(&headers("x-api-key", "key123"));
    assert_eq!(key.as_deref(), Some("key123"));
}

#[::core::prelude::v1::test]
fn test_extract_api_key_none() {
    assert!(extract_api_key(&HeaderMap::new()).is_none());
    assert!(extract_api_key(&headers("authorization", "Basic abc")).is_none());
    assert!(extract_api_key(&headers("authorization", "Bearer ")).is_none());
}

#[actix_web::test]
async fn test_owner_auth_injects_owner() {
    let app = test::init_service(
        App::new()
            .wrap(OwnerAuth::new(users()))
            .route("/whoami", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("x-api-key", "ops-key"))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, web::Bytes::from_static(b"ops:true"));
}

#[actix_web::test]
async fn test_owner_auth_rejects_unknown_key() {
    let app = test::init_service(
        App::new()
            .wrap(OwnerAuth::new(users()))
            .route("/whoami", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("authorization", "Bearer wrong"))
        .to_request();
    let err = test::try_call_service(&app, req).await.unwrap_err();
    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get().uri("/whoami").to_request();
    let err = test::try_call_service(&app, req).await.unwrap_err();
    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_request_id_is_echoed_or_generated() {
    let app = test::init_service(
        App::new()
            .wrap(RequestIdMiddleware)
            .route("/", web::get().to(HttpResponse::Ok)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("x-request-id", "abc-123"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.headers().get("x-request-id").unwrap(), "abc-123");

    let req = test::TestRequest::get().uri("/").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.headers().get("x-request-id").unwrap().len(), 36);
}
