/**
 * Authentication Handler Types
 *
 * Request and response bodies for the register and login endpoints.
 * Request fields are optional at the serde level so a missing field turns
 * into our own 400 response rather than a framework rejection.
 */

use serde::{Deserialize, Serialize};

/// Register request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// Login identifier
    #[serde(default)]
    pub gmail: Option<String>,
    /// Plaintext password (hashed before storage)
    #[serde(default)]
    pub password: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub gmail: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Plain acknowledgement body
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

/// Login response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// Return the field when present and non-empty
pub(crate) fn required(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
