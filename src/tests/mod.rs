mod category_tests;
mod user_tests;

use crate::api::{self, rate_limit::RateLimiter};
use crate::auth::jwt::JwtService;
use crate::core::services::CatalogService;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret";

pub fn create_test_service() -> CatalogService<InMemoryStorage> {
    CatalogService::new(InMemoryStorage::new(), JwtService::new(TEST_SECRET, 3600))
}

pub fn test_app_with_limit(max: u32) -> Router {
    api::app(
        Arc::new(create_test_service()),
        RateLimiter::new(max, Duration::from_secs(600)),
    )
}

pub fn test_app() -> Router {
    test_app_with_limit(100)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    TestResponse { status, headers, body }
}

/// Registers through the API and returns a login token.
pub async fn token_for(app: &Router, username: &str, role: &str) -> String {
    let email = format!("{}@example.com", username);
    let registered = send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(serde_json::json!({
            "username": username,
            "email": email,
            "password": "secret1",
            "role": role,
        })),
    )
    .await;
    assert_eq!(registered.status, StatusCode::CREATED, "{:?}", registered.body);

    let login = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({ "email": email, "password": "secret1" })),
    )
    .await;
    assert_eq!(login.status, StatusCode::OK, "{:?}", login.body);
    login.body["token"].as_str().unwrap().to_string()
}
