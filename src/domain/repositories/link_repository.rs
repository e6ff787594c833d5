//! Repository trait for short link data access.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;

/// Repository interface for managing short links.
///
/// Every method is a single transactional unit against the persistent
/// store; no method spans multiple statements. Lookups distinguish absence
/// (`Ok(None)`) from failure (`Err`).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its long URL within one owner's identity space.
    ///
    /// `owner_id = None` matches anonymous links only; all unauthenticated
    /// callers share that space for de-duplication purposes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_long_link(
        &self,
        long_link: &str,
        owner_id: Option<Uuid>,
    ) -> Result<Option<Link>, AppError>;

    /// Finds a link by its long URL across all owners.
    ///
    /// Used by the global reverse-lookup (search) operation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_any_by_long_link(&self, long_link: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_short_link(&self, short_link: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by short code restricted to a specific owner.
    ///
    /// Anonymous links can never match: the lookup requires a concrete
    /// owner id, so ownership mismatch and true absence are
    /// indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_short_link_and_owner(
        &self,
        short_link: &str,
        owner_id: Uuid,
    ) -> Result<Option<Link>, AppError>;

    /// Finds a link by its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Inserts a new link and returns its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the store detects a uniqueness
    /// violation the caller's checks did not catch (the documented
    /// check-then-insert race window).
    ///
    /// Returns [`AppError::Internal`] on other database errors.
    async fn insert(&self, new_link: NewLink) -> Result<i64, AppError>;

    /// Atomically increments `access_count` by 1 and sets
    /// `last_accessed_at` to now.
    ///
    /// Returns `false` when no row matches the code (not an error).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_access(&self, short_link: &str) -> Result<bool, AppError>;

    /// Updates `long_link` and bumps `last_accessed_at`.
    ///
    /// Returns the updated row, or `None` when the code does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_long_link(
        &self,
        short_link: &str,
        new_long_link: &str,
    ) -> Result<Option<Link>, AppError>;

    /// Physically deletes a link by short code.
    ///
    /// Returns whether a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, short_link: &str) -> Result<bool, AppError>;

    /// Physically deletes a link by id.
    ///
    /// Deleting an id that no longer exists returns `Ok(false)`, making
    /// this safe as the body of an at-least-once deferred job.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// Lists all links whose expiry is set and strictly before `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_expired(&self, now: DateTime<Utc>) -> Result<Vec<Link>, AppError>;

    /// Lists all links that carry an expiry, past or future.
    ///
    /// Used at startup to re-schedule pending deletion jobs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_with_expiry(&self) -> Result<Vec<Link>, AppError>;
}
