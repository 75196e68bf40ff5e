/**
 * Application State Management
 *
 * `AppState` is the central container handed to the router. Every field is
 * an `Arc` built once at startup and never mutated afterwards, so cloning
 * the state per request is cheap and needs no locking.
 *
 * The `FromRef` implementations let handlers extract only the part they
 * use, e.g. `State(keys): State<Arc<SessionKeys>>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::auth::users::AccountStore;
use crate::backend::server::config::ServerConfig;
use crate::backend::uploads::storage::MediaStore;

#[derive(Clone)]
pub struct AppState {
    /// Immutable process-wide configuration
    pub config: Arc<ServerConfig>,

    /// Identity store
    pub accounts: Arc<dyn AccountStore>,

    /// Token signing and verification keys, derived from `config.jwt_secret`
    pub sessions: Arc<SessionKeys>,

    /// File storage provider
    pub media: Arc<dyn MediaStore>,
}

impl AppState {
    /// Assemble state from a config and its collaborators
    pub fn new(
        config: ServerConfig,
        accounts: Arc<dyn AccountStore>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        let sessions = Arc::new(SessionKeys::new(&config.jwt_secret));
        Self {
            config: Arc::new(config),
            accounts,
            sessions,
            media,
        }
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn AccountStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.accounts.clone()
    }
}

impl FromRef<AppState> for Arc<SessionKeys> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<dyn MediaStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.media.clone()
    }
}
