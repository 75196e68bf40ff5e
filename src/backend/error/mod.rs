//! Backend Error Module
//!
//! Error types returned by handlers and middleware, and their conversion
//! into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports
//! ├── types.rs      - ApiError taxonomy
//! └── conversion.rs - IntoResponse implementation
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{ApiError, SERVER_ERROR_MESSAGE};
