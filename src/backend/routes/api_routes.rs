/**
 * API Routes
 *
 * # Routes
 *
 * - `POST /api/register` - Account registration (public)
 * - `POST /api/login` - Login, returns a JWT (public)
 * - `POST /api/dashboard` - File upload (bearer token unless the gate is disabled)
 *
 * The upload route is built once. The bearer gate is layered on top of it
 * when `require_upload_auth` is set, so the gated and ungated variants
 * share one handler and one route table.
 */

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::post,
    Router,
};

use crate::backend::auth::{login, register};
use crate::backend::middleware::require_bearer;
use crate::backend::server::state::AppState;
use crate::backend::uploads::upload_file;

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    router
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .merge(upload_routes(app_state))
}

/// Upload route, optionally behind the bearer gate
fn upload_routes(app_state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/api/dashboard", post(upload_file))
        .layer(DefaultBodyLimit::max(app_state.config.max_upload_bytes));

    if app_state.config.require_upload_auth {
        routes.route_layer(from_fn_with_state(app_state.clone(), require_bearer))
    } else {
        tracing::warn!("Upload route is not protected by authentication");
        routes
    }
}
