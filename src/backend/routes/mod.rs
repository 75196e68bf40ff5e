//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs         - Module exports
//! ├── router.rs      - Router assembly and global layers
//! └── api_routes.rs  - /api endpoints and the upload auth gate
//! ```

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
