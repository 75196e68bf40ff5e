//! Authentication Handlers Module
//!
//! HTTP handlers for the public authentication endpoints.
//!
//! # Handlers
//!
//! - **`register`** - POST /api/register - Account registration
//! - **`login`** - POST /api/login - Credential check and token issuance

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

pub use types::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};

pub use login::login;
pub use register::register;
