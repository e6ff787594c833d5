//! Handler for the expired links listing.

use axum::{Json, extract::State};

use crate::api::dto::link::LinkResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists links that are expired but not yet reclaimed.
///
/// # Endpoint
///
/// `GET /links/expired`
///
/// Observability and backfill only; listing never triggers deletion.
pub async fn expired_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let expired = state.link_service.list_expired().await?;

    Ok(Json(expired.into_iter().map(Into::into).collect()))
}
