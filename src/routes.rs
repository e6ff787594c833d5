//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/links/*`     - Link lifecycle API (identity resolved per request)
//! - `GET /health`  - Health check: DB and cache status
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging

use crate::api;
use crate::api::handlers::health_handler;
use crate::state::AppState;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// Constructs the application router with all routes and middleware.
///
/// The server wraps this in a trailing-slash normalizer before serving,
/// so `/links/` and `/links` are equivalent.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::link_routes())
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
