//! Authentication Module
//!
//! This module handles account registration, login and session tokens.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - Account model and identity stores
//! ├── passwords.rs    - bcrypt hashing on the blocking pool
//! ├── sessions.rs     - JWT issuance and verification
//! ├── credentials.rs  - Register/login flow
//! └── handlers/       - HTTP handlers
//!     ├── types.rs    - Request/response types
//!     ├── register.rs - POST /api/register
//!     └── login.rs    - POST /api/login
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, gmail and password → account created (201)
//! 2. **Login**: gmail and password → credentials verified → JWT returned
//! 3. **Upload**: JWT in `Authorization: Bearer` → verified by the auth middleware
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt (cost 10 unless configured)
//! - Tokens are HS256 JWTs valid for 7 days
//! - Invalid credentials return 401 with no hint about which part was wrong

/// Account model and identity stores
pub mod users;

/// Password hashing
pub mod passwords;

/// JWT token generation and validation
pub mod sessions;

/// Registration and login flow
pub mod credentials;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{login, register};
pub use sessions::SessionKeys;
pub use users::{Account, AccountStore, MemoryAccountStore, PgAccountStore};
