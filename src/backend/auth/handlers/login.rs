/**
 * Login Handler
 *
 * This module implements POST /api/login.
 *
 * # Authentication Process
 *
 * 1. Check both fields are present
 * 2. Look up the account by `gmail`
 * 3. Verify the password using bcrypt
 * 4. Issue a 7-day JWT
 *
 * # Security
 *
 * - Unknown account and wrong password return the same 401 body
 * - Passwords are never logged or returned in responses
 */

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::credentials;
use crate::backend::auth::handlers::types::{required, LoginRequest, LoginResponse};
use crate::backend::auth::sessions::SessionKeys;
use crate::backend::auth::users::AccountStore;
use crate::backend::error::ApiError;

pub const MISSING_CREDENTIALS_MESSAGE: &str = "Credentials missing";
pub const LOGGED_IN_MESSAGE: &str = "Login successful";

/// Login handler
///
/// # Example Response
///
/// ```json
/// {
///   "message": "Login successful",
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
/// }
/// ```
pub async fn login(
    State(accounts): State<Arc<dyn AccountStore>>,
    State(keys): State<Arc<SessionKeys>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!("Unreadable login body: {}", e);
        ApiError::validation(MISSING_CREDENTIALS_MESSAGE)
    })?;

    let (Some(gmail), Some(password)) = (required(request.gmail), required(request.password))
    else {
        return Err(ApiError::validation(MISSING_CREDENTIALS_MESSAGE));
    };

    tracing::info!("Login request for: {}", gmail);

    let token = credentials::login(accounts.as_ref(), &keys, &gmail, &password).await?;

    Ok(Json(LoginResponse {
        message: LOGGED_IN_MESSAGE.to_string(),
        token,
    }))
}
