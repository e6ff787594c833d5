//! Caching layer for the hot read paths.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`NullCache`] - No-op implementation for testing/disabled caching

mod keys;
mod null_cache;
mod redis_cache;
mod service;

pub use keys::{expired_links_key, long_link_key, search_key, stats_key};
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;
