//! Handler for short link resolution.

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub short_link: String,
}

/// Resolves a short code and redirects to the long URL.
///
/// # Endpoint
///
/// `GET /links?short_link={code}`
///
/// # Behavior
///
/// Responds with 307 Temporary Redirect so repeated requests re-enter
/// this path and each visit is counted. The redirect target always
/// carries a scheme; stored URLs without one get `http://` prepended.
///
/// # Errors
///
/// Returns 404 Not Found for an unknown or expired code.
pub async fn resolve_handler(
    State(state): State<AppState>,
    Query(params): Query<ResolveParams>,
) -> Result<Redirect, AppError> {
    let long_link = state.link_service.resolve(&params.short_link).await?;

    Ok(Redirect::temporary(&long_link))
}
