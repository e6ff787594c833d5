//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves usage statistics for a short link.
///
/// # Endpoint
///
/// `GET /links/{code}/stats`
///
/// # Behavior
///
/// Read-only: reporting never increments the access counter and expired
/// links keep reporting until the deferred deletion job reclaims them.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.link_service.stats(&code).await?;

    Ok(Json(stats.into()))
}
