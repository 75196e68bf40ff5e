//! Middleware Module
//!
//! HTTP middleware applied to routes before they reach handlers.
//!
//! - **`auth`** - Bearer-token gate for protected routes
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use filegate::backend::middleware::require_bearer;
//!
//! let protected = router.route_layer(from_fn_with_state(app_state, require_bearer));
//! ```

pub mod auth;

pub use auth::{require_bearer, AuthUser, AuthenticatedUser};
