//! Common test utilities and helpers
//!
//! - App fixture backed by the in-memory account store and a temp upload dir
//! - Authentication helpers
//! - Response assertions

#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;

pub use assertions::*;
pub use auth_helpers::*;

use std::sync::Arc;

use axum_test::TestServer;
use filegate::backend::auth::users::MemoryAccountStore;
use filegate::backend::routes::create_router;
use filegate::backend::server::config::DEFAULT_MAX_UPLOAD_BYTES;
use filegate::backend::server::{AppState, ServerConfig};
use filegate::backend::uploads::DiskStore;
use tempfile::TempDir;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";
pub const TEST_BASE_URL: &str = "http://files.test";

/// Test application fixture
///
/// Keeps the temp directory alive for as long as the server is in use.
pub struct TestApp {
    pub server: TestServer,
    pub accounts: Arc<MemoryAccountStore>,
    pub upload_dir: TempDir,
}

/// Build an app with the upload gate on or off
pub fn spawn_app(require_upload_auth: bool) -> TestApp {
    spawn_app_with_limit(require_upload_auth, DEFAULT_MAX_UPLOAD_BYTES)
}

/// Build an app with a custom upload body limit
pub fn spawn_app_with_limit(require_upload_auth: bool, max_upload_bytes: usize) -> TestApp {
    let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");

    let config = ServerConfig::builder()
        .jwt_secret(TEST_JWT_SECRET)
        .bcrypt_cost(4)
        .require_upload_auth(require_upload_auth)
        .max_upload_bytes(max_upload_bytes)
        .disk_media(upload_dir.path(), Some(TEST_BASE_URL.to_string()))
        .build()
        .expect("Failed to build test config");

    let accounts = Arc::new(MemoryAccountStore::new());
    let media = Arc::new(DiskStore::new(upload_dir.path(), TEST_BASE_URL));

    let app = create_router(AppState::new(config, accounts.clone(), media));
    let server = TestServer::new(app).expect("Failed to start test server");

    TestApp {
        server,
        accounts,
        upload_dir,
    }
}

/// Build the default (gated) app
pub fn spawn_gated_app() -> TestApp {
    spawn_app(true)
}
