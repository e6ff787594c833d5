//! Health check endpoint.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    database: bool,
    cache: bool,
}

/// Reports service liveness and dependency health.
///
/// # Endpoint
///
/// `GET /health`
///
/// Returns 200 when the database answers, 503 otherwise. Cache health is
/// reported but never degrades the status: a missing cache only costs
/// hit-rate.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let database = sqlx::query("SELECT 1")
        .execute(state.db.as_ref())
        .await
        .is_ok();
    let cache = state.cache.health_check().await;

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
        cache,
    };

    (status, Json(body))
}
