/**
 * Authentication Middleware
 *
 * This module gates protected routes behind a bearer token. It reads the
 * `Authorization` header, verifies the JWT and attaches the caller's
 * account id to the request extensions.
 *
 * # Responses
 *
 * - Header absent → 401 `{"message": "Token missing"}`
 * - Header present but no usable token (bad signature, expired, malformed,
 *   non-UUID subject) → 403 `{"message": "Invalid token"}`
 *
 * The gate does not touch the identity store. A valid signature is taken
 * as proof of identity at issue time, so tokens for deleted accounts keep
 * working until they expire.
 */

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::error::ApiError;

pub const TOKEN_MISSING_MESSAGE: &str = "Token missing";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

/// Authenticated caller extracted from the JWT
#[derive(Clone, Debug, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Take the second whitespace-separated item of the header as the token
fn bearer_token(header: &str) -> Option<&str> {
    header.split_whitespace().nth(1)
}

/// Bearer-token middleware
///
/// Use with `axum::middleware::from_fn_with_state` on any route that needs
/// an authenticated caller.
pub async fn require_bearer(
    State(keys): State<Arc<SessionKeys>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request.headers().get(AUTHORIZATION).ok_or_else(|| {
        tracing::warn!("Missing Authorization header");
        ApiError::unauthorized(TOKEN_MISSING_MESSAGE)
    })?;

    let token = header
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            ApiError::forbidden(INVALID_TOKEN_MESSAGE)
        })?;

    let user_id = keys.account_id(token).map_err(|e| {
        tracing::warn!("Invalid token: {}", e);
        ApiError::forbidden(INVALID_TOKEN_MESSAGE)
    })?;

    request.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated caller
///
/// Rejects with 401 when the request did not pass through `require_bearer`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::unauthorized(TOKEN_MISSING_MESSAGE)
            })
    }
}
