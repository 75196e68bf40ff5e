//! Backend Module
//!
//! All server-side code: an Axum HTTP service with account registration,
//! login and an authenticated file upload endpoint.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, app creation
//! - **`routes`** - Route table and global layers
//! - **`auth`** - Accounts, password hashing, JWT sessions, auth handlers
//! - **`middleware`** - Bearer-token gate
//! - **`uploads`** - Upload handler and media providers
//! - **`error`** - API error taxonomy
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Config, state, initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── uploads/        - File uploads
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the immutable `ServerConfig`, the identity store, the
//! session keys and the media provider, each behind an `Arc`. There is no
//! shared mutable state between requests apart from the stores themselves.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, ApiError>`. Collaborator failures are mapped at
//! the handler boundary; internal details are logged, never returned.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and account management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// File uploads and storage providers
pub mod uploads;

pub use error::ApiError;
pub use server::{create_app, AppState, ServerConfig};
