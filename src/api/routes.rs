//! API Routes
//!
//! Configures the Axum router with all entry server endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, clear_cache_handler, health_handler, list_entries_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /entries` - Stream entries as a JSON array (`limit`, `offset`)
/// - `GET /cache-stats` - Cache size, keys and TTL
/// - `GET|POST /clear-cache` - Drop every cached page
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/entries", get(list_entries_handler))
        .route("/cache-stats", get(cache_stats_handler))
        .route(
            "/clear-cache",
            get(clear_cache_handler).post(clear_cache_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
