/**
 * Server Initialization
 *
 * Builds the collaborators named by `ServerConfig` and wires them into the
 * router.
 *
 * # Initialization Process
 *
 * 1. Connect the identity store (Postgres + migrations, or in-memory)
 * 2. Construct the media provider (Cloudinary or local disk)
 * 3. Assemble `AppState` and create the router
 *
 * # Error Handling
 *
 * A configured database that cannot be reached is fatal. Running without
 * `DATABASE_URL` is allowed for development and logs a warning, since
 * accounts then disappear on restart.
 */

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use thiserror::Error;

use crate::backend::auth::users::{AccountStore, MemoryAccountStore, PgAccountStore};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{MediaConfig, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::uploads::cloudinary::CloudinaryStore;
use crate::backend::uploads::disk::DiskStore;
use crate::backend::uploads::storage::{MediaStore, StorageError};

#[derive(Debug, Error)]
pub enum InitError {
    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("media provider setup failed: {0}")]
    Media(#[from] StorageError),
}

/// Connect the identity store named by the config
pub async fn load_account_store(config: &ServerConfig) -> Result<Arc<dyn AccountStore>, InitError> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Accounts are kept in memory and lost on restart.");
        return Ok(Arc::new(MemoryAccountStore::new()));
    };

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url).await?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(Arc::new(PgAccountStore::new(pool)))
}

/// Construct the media provider named by the config
pub fn load_media_store(config: &ServerConfig) -> Result<Arc<dyn MediaStore>, InitError> {
    match &config.media {
        MediaConfig::Cloudinary(cloudinary) => {
            tracing::info!(
                "Uploads go to Cloudinary cloud '{}' folder '{}'",
                cloudinary.cloud_name,
                cloudinary.folder
            );
            Ok(Arc::new(CloudinaryStore::new(cloudinary.clone())?))
        }
        MediaConfig::Disk {
            dir,
            public_base_url,
        } => {
            tracing::info!("Uploads go to local directory {}", dir.display());
            Ok(Arc::new(DiskStore::new(dir.clone(), public_base_url.clone())))
        }
    }
}

/// Create and configure the Axum application
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing filegate backend server");

    let accounts = load_account_store(&config).await?;
    let media = load_media_store(&config)?;

    let upload_auth = config.require_upload_auth;
    let app = create_router(AppState::new(config, accounts, media));

    tracing::info!(
        "Router configured (upload auth {})",
        if upload_auth { "enabled" } else { "disabled" }
    );

    Ok(app)
}
