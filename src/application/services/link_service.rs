//! Link lifecycle orchestration.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::{Link, LinkStats, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{
    CacheService, expired_links_key, long_link_key, search_key, stats_key,
};
use crate::infrastructure::scheduler::{DeferredJob, Scheduler};
use crate::utils::code_generator::{derive_code, validate_alias};
use crate::utils::url_normalizer::ensure_scheme;

/// TTLs (seconds) for the cached read paths.
#[derive(Debug, Clone, Copy)]
pub struct CacheTtls {
    pub resolve: u64,
    pub stats: u64,
    pub search: u64,
    pub expired: u64,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            resolve: 60,
            stats: 60,
            search: 30,
            expired: 60,
        }
    }
}

/// Orchestrates link creation, resolution, mutation and expiry.
///
/// This is the only component the HTTP boundary invokes. It composes the
/// link store, the read-through cache and the deferred-job scheduler,
/// enforcing the ownership and uniqueness invariants:
///
/// - short codes live in one global namespace
/// - long-link de-duplication is scoped per owner, with all anonymous
///   callers sharing a single identity space
/// - only the owner may update or delete; anonymous links are immutable
///   through the owner-scoped operations
///
/// The service holds no mutable state; every store call is a single
/// transactional unit and cache invalidation strictly follows the store
/// commit.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
    scheduler: Arc<dyn Scheduler>,
    ttls: CacheTtls,
}

impl LinkService {
    /// Creates a new lifecycle service over its collaborators.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        scheduler: Arc<dyn Scheduler>,
        ttls: CacheTtls,
    ) -> Self {
        Self {
            links,
            cache,
            scheduler,
            ttls,
        }
    }

    /// Creates a short link.
    ///
    /// # Flow
    ///
    /// 1. Owner-scoped de-duplication on the long URL
    /// 2. Short code selection: validated custom alias, or deterministic
    ///    derivation with a fail-fast collision policy (no retry-with-salt:
    ///    retrying the same input would collide identically, so a collision
    ///    signals the caller should supply a custom alias)
    /// 3. Insert with `access_count = 0` and both timestamps set to now
    /// 4. When an expiry is set, schedule the deferred deletion job
    /// 5. Re-read the row by id so store-assigned defaults are reflected
    ///
    /// Steps 1-2 are check-then-insert, not a serialized unit: a true
    /// concurrent double-submit can pass the checks and lose at insert
    /// time. That lost race surfaces as the same business error arriving
    /// late, never as a silent duplicate.
    ///
    /// # Errors
    ///
    /// - [`AppError::AlreadyExists`] - this owner already shortened the URL
    /// - [`AppError::AliasTaken`] - the custom alias is in use
    /// - [`AppError::GenerationFailed`] - the derived code collides with a
    ///   different link
    /// - [`AppError::Validation`] - empty custom alias
    pub async fn create_link(
        &self,
        long_link: String,
        custom_alias: Option<String>,
        expires_at: Option<DateTime<Utc>>,
        owner: Option<Uuid>,
    ) -> Result<Link, AppError> {
        if let Some(existing) = self.links.find_by_long_link(&long_link, owner).await? {
            return Err(AppError::already_exists(
                "Link already exists",
                json!({ "short_link": existing.short_link }),
            ));
        }

        let had_custom_alias = custom_alias.is_some();
        let short_link = match custom_alias {
            Some(alias) => {
                validate_alias(&alias)?;

                if self.links.find_by_short_link(&alias).await?.is_some() {
                    return Err(AppError::alias_taken(
                        "Custom alias is already in use",
                        json!({ "alias": alias }),
                    ));
                }

                alias
            }
            None => {
                let code = derive_code(&long_link, owner);

                if self.links.find_by_short_link(&code).await?.is_some() {
                    return Err(AppError::generation_failed(
                        "Failed to derive a unique short code",
                        json!({ "code": code }),
                    ));
                }

                code
            }
        };

        let new_link = NewLink {
            long_link: long_link.clone(),
            short_link,
            is_authenticated: owner.is_some(),
            owner_id: owner,
            created_at: Utc::now(),
            expires_at,
        };

        let id = match self.links.insert(new_link).await {
            Ok(id) => id,
            Err(AppError::Conflict { .. }) => {
                // Lost the check-then-insert race: a concurrent request won
                // the store constraint. Surface the business condition that
                // arrived late instead of a raw conflict.
                if self
                    .links
                    .find_by_long_link(&long_link, owner)
                    .await?
                    .is_some()
                {
                    return Err(AppError::already_exists(
                        "Link already exists",
                        json!({ "long_link": long_link }),
                    ));
                }

                return Err(if had_custom_alias {
                    AppError::alias_taken("Custom alias is already in use", json!({}))
                } else {
                    AppError::generation_failed("Failed to derive a unique short code", json!({}))
                });
            }
            Err(e) => return Err(e),
        };

        if let Some(expires_at) = expires_at {
            // Creation does not wait for expiry; a scheduling failure is a
            // degraded condition covered by the lazy expiry check.
            if let Err(e) = self
                .scheduler
                .schedule(DeferredJob::DeleteLink { link_id: id }, expires_at)
                .await
            {
                warn!(link_id = id, error = %e, "Failed to schedule deferred deletion");
            }
        }

        self.links.find_by_id(id).await?.ok_or_else(|| {
            AppError::internal("Inserted link could not be re-read", json!({ "id": id }))
        })
    }

    /// Resolves a short code to its redirect target.
    ///
    /// The cached long URL short-circuits the store lookup only; the
    /// access-count increment runs against the store on every successful
    /// resolve, cache hit or miss. Expired links resolve as absent: the
    /// lazy check guards against the deferred deletion job not having
    /// fired yet.
    ///
    /// The returned URL is guaranteed to carry a scheme (`http://` is
    /// prepended when the stored value has none); the stored value itself
    /// is never rewritten.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for a missing or expired code.
    pub async fn resolve(&self, short_link: &str) -> Result<String, AppError> {
        let key = long_link_key(short_link);

        let cached = match self.cache.get(&key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Cache read failed, falling back to store");
                None
            }
        };

        let long_link = match cached {
            Some(url) => url,
            None => {
                let link = self
                    .links
                    .find_by_short_link(short_link)
                    .await?
                    .ok_or_else(|| link_not_found(short_link))?;

                if link.is_expired(Utc::now()) {
                    return Err(link_not_found(short_link));
                }

                if let Err(e) = self
                    .cache
                    .set_with_ttl(&key, &link.long_link, self.ttls.resolve)
                    .await
                {
                    warn!(key, error = %e, "Failed to populate cache");
                }

                link.long_link
            }
        };

        if !self.links.increment_access(short_link).await? {
            // The row vanished between the cached read and the increment.
            return Err(link_not_found(short_link));
        }

        Ok(ensure_scheme(&long_link))
    }

    /// Retrieves usage statistics for a short code.
    ///
    /// Read-only: never increments counters and never checks expiry, so
    /// expired-but-not-yet-deleted links still report.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no link matches the code.
    pub async fn stats(&self, short_link: &str) -> Result<LinkStats, AppError> {
        let key = stats_key(short_link);

        if let Ok(Some(cached)) = self.cache.get(&key).await {
            match serde_json::from_str(&cached) {
                Ok(stats) => return Ok(stats),
                Err(e) => warn!(key, error = %e, "Discarding unparsable cached stats"),
            }
        }

        let link = self
            .links
            .find_by_short_link(short_link)
            .await?
            .ok_or_else(|| link_not_found(short_link))?;

        let stats = LinkStats::from(&link);

        if let Ok(payload) = serde_json::to_string(&stats) {
            if let Err(e) = self.cache.set_with_ttl(&key, &payload, self.ttls.stats).await {
                warn!(key, error = %e, "Failed to populate cache");
            }
        }

        Ok(stats)
    }

    /// Reverse lookup: finds the short code for a long URL.
    ///
    /// Scope is global, not owner-filtered.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the URL has not been shortened.
    pub async fn search(&self, long_link: &str) -> Result<String, AppError> {
        let key = search_key(long_link);

        if let Ok(Some(code)) = self.cache.get(&key).await {
            return Ok(code);
        }

        let link = self
            .links
            .find_any_by_long_link(long_link)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Link not found", json!({ "long_link": long_link }))
            })?;

        if let Err(e) = self
            .cache
            .set_with_ttl(&key, &link.short_link, self.ttls.search)
            .await
        {
            warn!(key, error = %e, "Failed to populate cache");
        }

        Ok(link.short_link)
    }

    /// Updates the long URL behind a short code.
    ///
    /// Only the owner may update. Ownership mismatch, true absence and an
    /// anonymous caller are indistinguishable `NotFound`s so the existence
    /// of other users' links is not leaked. The cache entries for the code
    /// are invalidated after the store commit so no caller sees the stale
    /// destination.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] per the ownership rules above.
    pub async fn update_link(
        &self,
        short_link: &str,
        new_long_link: &str,
        owner: Option<Uuid>,
    ) -> Result<Link, AppError> {
        // No owner can ever match an anonymous link.
        let Some(owner) = owner else {
            return Err(link_not_found(short_link));
        };

        if self
            .links
            .find_by_short_link_and_owner(short_link, owner)
            .await?
            .is_none()
        {
            return Err(link_not_found(short_link));
        }

        let updated = self
            .links
            .update_long_link(short_link, new_long_link)
            .await?
            .ok_or_else(|| link_not_found(short_link))?;

        self.invalidate_link_keys(short_link).await;

        Ok(updated)
    }

    /// Deletes a link.
    ///
    /// Same ownership scoping as [`Self::update_link`]; deletion is
    /// physical and immediate, followed by cache invalidation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] per the ownership rules.
    pub async fn delete_link(&self, short_link: &str, owner: Option<Uuid>) -> Result<(), AppError> {
        let Some(owner) = owner else {
            return Err(link_not_found(short_link));
        };

        if self
            .links
            .find_by_short_link_and_owner(short_link, owner)
            .await?
            .is_none()
        {
            return Err(link_not_found(short_link));
        }

        if !self.links.delete(short_link).await? {
            return Err(link_not_found(short_link));
        }

        self.invalidate_link_keys(short_link).await;

        Ok(())
    }

    /// Lists links that are expired but not yet reclaimed by the deferred
    /// deletion job.
    ///
    /// Observability only; never triggers deletion itself.
    pub async fn list_expired(&self) -> Result<Vec<Link>, AppError> {
        let key = expired_links_key();

        if let Ok(Some(cached)) = self.cache.get(&key).await {
            match serde_json::from_str(&cached) {
                Ok(links) => return Ok(links),
                Err(e) => warn!(key, error = %e, "Discarding unparsable cached listing"),
            }
        }

        let expired = self.links.list_expired(Utc::now()).await?;

        if let Ok(payload) = serde_json::to_string(&expired) {
            if let Err(e) = self
                .cache
                .set_with_ttl(&key, &payload, self.ttls.expired)
                .await
            {
                warn!(key, error = %e, "Failed to populate cache");
            }
        }

        Ok(expired)
    }

    /// Invalidates every cache entry keyed by this short code.
    async fn invalidate_link_keys(&self, short_link: &str) {
        for key in [long_link_key(short_link), stats_key(short_link)] {
            if let Err(e) = self.cache.invalidate(&key).await {
                warn!(key, error = %e, "Failed to invalidate cache entry");
            }
        }
    }
}

fn link_not_found(short_link: &str) -> AppError {
    AppError::not_found("Link not found", json!({ "short_link": short_link }))
}
