//! Handler for the link shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::link::LinkResponse;
use crate::api::dto::shorten::ShortenRequest;
use crate::api::extract::CallerIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /links/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "long_link": "https://example.com/some/long/path",
///   "custom_alias": "my-alias",                 // optional
///   "expires_at": "2026-12-31T23:59:59Z"        // optional
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request when this caller already shortened the URL, the
///   custom alias is taken, or validation fails
/// - 500 Internal Server Error when the derived code collides with a
///   different link (supply a custom alias instead)
pub async fn shorten_handler(
    State(state): State<AppState>,
    CallerIdentity(owner): CallerIdentity,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(
            payload.long_link,
            payload.custom_alias,
            payload.expires_at,
            owner,
        )
        .await?;

    Ok(Json(link.into()))
}
