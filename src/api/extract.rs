//! Caller identity extraction.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AppError;
use crate::state::AppState;
use uuid::Uuid;

/// The caller identity resolved for this request.
///
/// `None` is the anonymous identity: no `Authorization` header, a
/// malformed one, or a token that matches no active credential. Handlers
/// pass the inner value straight to the lifecycle service; requests are
/// never rejected for lacking credentials at this layer.
pub struct CallerIdentity(pub Option<Uuid>);

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let identity = state.auth_service.resolve_identity(token).await?;

        Ok(CallerIdentity(identity))
    }
}
