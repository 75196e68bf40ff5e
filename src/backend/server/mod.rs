//! Server Module
//!
//! Configuration loading, application state and app creation.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs     - Module exports and documentation
//! ├── config.rs  - ServerConfig loaded once from the environment
//! ├── state.rs   - AppState and FromRef implementations
//! └── init.rs    - Collaborator construction and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env()`
//! 2. **Collaborators**: identity store and media provider
//! 3. **Router Creation**: routes, auth gate, CORS and tracing layers

/// Server configuration loading
pub mod config;

/// Application state management
pub mod state;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::{create_app, InitError};
pub use state::AppState;
