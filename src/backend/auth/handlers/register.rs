/**
 * Register Handler
 *
 * This module implements POST /api/register.
 *
 * # Request
 *
 * ```json
 * { "name": "Alice", "gmail": "alice@x.com", "password": "pw123" }
 * ```
 *
 * # Responses
 *
 * - `201` `{"message": "User registered successfully"}`
 * - `400` `{"message": "All fields required"}` - missing/empty field or unreadable body
 * - `409` `{"message": "User already exists"}`
 * - `500` `{"message": "Server error"}`
 */

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::credentials::{self, Registration};
use crate::backend::auth::handlers::types::{required, MessageResponse, RegisterRequest};
use crate::backend::auth::users::AccountStore;
use crate::backend::error::ApiError;
use crate::backend::server::config::ServerConfig;

pub const MISSING_FIELDS_MESSAGE: &str = "All fields required";
pub const REGISTERED_MESSAGE: &str = "User registered successfully";

/// Register handler
pub async fn register(
    State(accounts): State<Arc<dyn AccountStore>>,
    State(config): State<Arc<ServerConfig>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!("Unreadable register body: {}", e);
        ApiError::validation(MISSING_FIELDS_MESSAGE)
    })?;

    let (Some(name), Some(gmail), Some(password)) = (
        required(request.name),
        required(request.gmail),
        required(request.password),
    ) else {
        return Err(ApiError::validation(MISSING_FIELDS_MESSAGE));
    };

    tracing::info!("Register request for: {}", gmail);

    credentials::register(
        accounts.as_ref(),
        config.bcrypt_cost,
        Registration {
            name,
            gmail,
            password,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: REGISTERED_MESSAGE.to_string(),
        }),
    ))
}
