/**
 * API Error Types
 *
 * This module defines the error taxonomy returned by every HTTP handler.
 * Collaborator failures (database, bcrypt, token codec, media provider) are
 * mapped into one of these variants at the handler boundary.
 *
 * # Error Categories
 *
 * - `Validation` - missing or malformed input (400)
 * - `Conflict` - duplicate unique key (409)
 * - `Unauthorized` - bad credentials or missing token (401)
 * - `Forbidden` - token present but invalid or expired (403)
 * - `PayloadTooLarge` - request body over the configured limit (413)
 * - `Internal` - unexpected collaborator failure (500)
 *
 * Internal errors carry a detail string for the server log. The detail is
 * never sent to the client.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Generic message returned for every internal failure
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Errors returned by HTTP handlers and middleware
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed client input
    #[error("Validation error: {message}")]
    Validation {
        /// Message returned to the client
        message: String,
    },

    /// A unique key is already taken
    #[error("Conflict: {message}")]
    Conflict {
        /// Message returned to the client
        message: String,
    },

    /// Credentials rejected or no token supplied
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Message returned to the client
        message: String,
    },

    /// Token supplied but rejected
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Message returned to the client
        message: String,
    },

    /// Request body over the configured limit
    #[error("Payload too large: {message}")]
    PayloadTooLarge {
        /// Message returned to the client
        message: String,
    },

    /// Unexpected failure in a collaborator
    #[error("Internal error: {detail}")]
    Internal {
        /// Server-side detail, logged but never returned
        detail: String,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::PayloadTooLarge {
            message: message.into(),
        }
    }

    /// Create an internal error and log its detail
    ///
    /// The detail goes to the server log at `error` level. Clients only ever
    /// see [`SERVER_ERROR_MESSAGE`].
    pub fn internal(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        tracing::error!("{}", detail);
        Self::Internal { detail }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing message
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Conflict { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::PayloadTooLarge { message } => message.clone(),
            Self::Internal { .. } => SERVER_ERROR_MESSAGE.to_string(),
        }
    }
}
