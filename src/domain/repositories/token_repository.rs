//! Repository trait for API token lookups.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;

/// Repository interface for the bearer-token identity boundary.
///
/// Tokens are stored hashed; this trait only ever sees the hash.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Resolves a token hash to the owning user id.
    ///
    /// Revoked tokens resolve to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_user_by_hash(&self, token_hash: &str) -> Result<Option<Uuid>, AppError>;

    /// Records that a token was just used.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn touch_last_used(&self, token_hash: &str) -> Result<(), AppError>;
}
