//! Handler for reverse lookup of short links.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub long_link: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub short_link: String,
}

/// Finds the short code for a long URL.
///
/// # Endpoint
///
/// `GET /links/search?long_link={url}`
///
/// The lookup spans all owners; the code namespace is shared.
///
/// # Errors
///
/// Returns 404 Not Found if the URL has not been shortened.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let short_link = state.link_service.search(&params.long_link).await?;

    Ok(Json(SearchResponse { short_link }))
}
