//! Handlers for link mutation endpoints (update, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::LinkResponse;
use crate::api::dto::update_link::UpdateLinkRequest;
use crate::api::extract::CallerIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Repoints a short link at a new long URL.
///
/// # Endpoint
///
/// `PUT /links/{code}`
///
/// # Request Body
///
/// ```json
/// {
///   "new_long_link": "https://new-destination.com"
/// }
/// ```
///
/// # Ownership
///
/// Only the owner may update. A missing code, someone else's code and an
/// anonymous caller all answer 404 Not Found so the existence of other
/// users' links is never leaked.
///
/// # Cache
///
/// The cache entries for this code are invalidated so the next resolve
/// uses the updated destination.
pub async fn update_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    CallerIdentity(owner): CallerIdentity,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .update_link(&code, &payload.new_long_link, owner)
        .await?;

    Ok(Json(link.into()))
}

/// Deletes a short link.
///
/// # Endpoint
///
/// `DELETE /links/{code}`
///
/// # Behavior
///
/// Deletion is physical and immediate; the cache entries for the code are
/// invalidated so the pre-delete destination is never served afterwards.
/// Ownership rules match [`update_link_handler`].
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    CallerIdentity(owner): CallerIdentity,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&code, owner).await?;

    Ok(StatusCode::NO_CONTENT)
}
