//! Route definitions and router construction.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::bootstrap::{AxumContext, CorsConfig, ServerConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin: AllowOrigin = match config {
        CorsConfig::AllowAll => Any.into(),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            allowed.into()
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::POST, Method::OPTIONS, Method::GET])
        .allow_headers([header::CONTENT_TYPE])
}

/// API routes without the `/api` prefix (for nesting under /api).
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/chat",
            post(handlers::chat::chat)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/chat/stream",
            post(handlers::chat::chat_stream)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        .route("/health", get(handlers::health::health))
        .route("/test", get(handlers::health::smoke_test))
}

/// Create the main Axum router.
///
/// Chat routes live under `/api`; `/health` is also served at the root.
pub fn create_router(ctx: AxumContext, config: &ServerConfig) -> Router {
    let state: AppState = Arc::new(ctx);

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(build_cors_layer(&config.cors))
}
