/**
 * Router Configuration
 *
 * Combines the API routes, optional static serving of disk uploads, and the
 * cross-cutting layers (request tracing, CORS) into one Axum router.
 */

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method, StatusCode,
    },
    response::{IntoResponse, Json},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::config::{MediaConfig, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::uploads::disk::UPLOADS_ROUTE;

/// Create the Axum router with all routes configured
///
/// - API routes (`/api/register`, `/api/login`, `/api/dashboard`)
/// - `/uploads/*` static files when the disk provider is active
/// - JSON 404 fallback
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new(), &app_state);

    let router = match &app_state.config.media {
        MediaConfig::Disk { dir, .. } => router.nest_service(UPLOADS_ROUTE, ServeDir::new(dir)),
        MediaConfig::Cloudinary(_) => router,
    };

    let router = router.fallback(not_found);

    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&app_state.config));

    router.layer(layers).with_state(app_state)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "message": "Not found" })),
    )
}

/// CORS for the configured browser origin, with credentials
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
}
