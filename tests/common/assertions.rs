//! Response assertions

use axum::http::StatusCode;
use axum_test::TestResponse;
use pretty_assertions::assert_eq;

/// Assert status and the `{"message": ...}` body together
pub fn assert_message(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(response.status_code(), status);
    let body: serde_json::Value = response.json();
    assert_eq!(body, serde_json::json!({ "message": message }));
}
