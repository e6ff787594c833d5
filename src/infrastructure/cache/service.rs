//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for the read-through cache over semantic string keys.
///
/// Keys name what they cache (`long_link:{code}`, `stats:{code}`, ...);
/// values are plain strings or JSON documents. Implementations must be
/// thread-safe and fail-open: a backend error is a miss on read and a
/// no-op on write, never a request failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a cached value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on cache hit
    /// - `Ok(None)` on cache miss or backend error (fail-open)
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value with an expiry.
    ///
    /// # Errors
    ///
    /// Production implementations log errors and return `Ok(())` so a
    /// cache outage never disrupts the request flow.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Removes a cached entry.
    ///
    /// Used when the underlying link is updated or deleted.
    async fn invalidate(&self, key: &str) -> CacheResult<()>;

    /// Removes every cached entry.
    ///
    /// Reserved for test/reset paths; production code paths never call it.
    async fn invalidate_all(&self) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by health check endpoints to report cache status.
    async fn health_check(&self) -> bool;
}
