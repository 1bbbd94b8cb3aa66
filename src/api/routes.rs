//! HTTP API route definitions and cross-origin policy.

use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_status_check, health, list_status_checks, ready, root, submit_contact, AppState,
};

/// Create the application router.
///
/// All business routes live under the `/api` prefix; `/health` and `/ready`
/// sit outside it for probes that bypass the public surface.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/", get(root))
        .route("/status", get(list_status_checks).post(create_status_check))
        .route("/contact", axum::routing::post(submit_contact));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .route("/ready", get(ready))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the CORS layer from the configured allow-list.
///
/// Credentials are allowed, so the wildcard cannot be sent literally (the
/// CORS protocol forbids `*` together with credentials); allowed origins,
/// methods, and headers are mirrored from the request instead.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
