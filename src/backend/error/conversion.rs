/**
 * Error Conversion
 *
 * `ApiError` implements `IntoResponse` so handlers and middleware can return
 * it directly. Every error body has the same shape:
 *
 * ```json
 * { "message": "Invalid credentials" }
 * ```
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({ "message": self.message() });

        (status, Json(body)).into_response()
    }
}
