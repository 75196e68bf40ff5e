//! Authentication test helpers
//!
//! Register and log in through the HTTP API, and build bearer headers.

use axum::http::{HeaderValue, StatusCode};
use axum_test::{TestResponse, TestServer};
use serde_json::json;

/// POST /api/register
pub async fn register(server: &TestServer, name: &str, gmail: &str, password: &str) -> TestResponse {
    server
        .post("/api/register")
        .json(&json!({ "name": name, "gmail": gmail, "password": password }))
        .await
}

/// POST /api/login
pub async fn login(server: &TestServer, gmail: &str, password: &str) -> TestResponse {
    server
        .post("/api/login")
        .json(&json!({ "gmail": gmail, "password": password }))
        .await
}

/// Register an account and return a fresh token for it
pub async fn register_and_login(server: &TestServer, gmail: &str, password: &str) -> String {
    let response = register(server, "Test User", gmail, password).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = login(server, gmail, password).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    body["token"]
        .as_str()
        .expect("login response has no token")
        .to_string()
}

/// Create authorization header value
pub fn auth_header(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("token is not a valid header value")
}
