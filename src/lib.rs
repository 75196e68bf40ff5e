//! filegate - Account and Upload Service
//!
//! A small Axum backend providing:
//! - Account registration with bcrypt-hashed passwords
//! - Login issuing 7-day HS256 JWTs
//! - A file upload endpoint behind a bearer-token gate, backed by Cloudinary
//!   or a local directory
//!
//! # Usage
//!
//! ```rust,no_run
//! use filegate::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # HTTP API
//!
//! | Method | Path | Auth |
//! |---|---|---|
//! | POST | `/api/register` | none |
//! | POST | `/api/login` | none |
//! | POST | `/api/dashboard` | `Authorization: Bearer <token>` |

/// Backend server-side code
pub mod backend;
