//! Cache gateway trait and error types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::UrlMapping;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key namespace for entries indexed by short code.
pub const SHORT_KEY_PREFIX: &str = "url:short:";

/// Key namespace for entries indexed by origin URL.
pub const ORIGIN_KEY_PREFIX: &str = "url:origin:";

pub fn short_key(short_code: &str) -> String {
    format!("{SHORT_KEY_PREFIX}{short_code}")
}

pub fn origin_key(origin_url: &str) -> String {
    format!("{ORIGIN_KEY_PREFIX}{origin_url}")
}

/// Expiring two-way cache of URL mappings.
///
/// Each mapping lives under two independent keys, one per lookup direction.
/// The directions are written and expired independently, so one may be
/// present while the other is not; callers fall back to the repository.
///
/// Implementations must be thread-safe and should not disrupt requests on
/// failure: errors are logged and treated as misses or no-ops.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process cache with TTL
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlCache: Send + Sync {
    /// Looks up the mapping stored under a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(mapping))` on cache hit
    /// - `Ok(None)` on cache miss
    /// - `Err(_)` if the backend failed; callers treat this as a miss
    async fn get_by_short(&self, short_code: &str) -> CacheResult<Option<UrlMapping>>;

    /// Looks up the mapping stored under an origin URL.
    async fn get_by_origin(&self, origin_url: &str) -> CacheResult<Option<UrlMapping>>;

    /// Stores the origin URL under the mapping's short code with the configured TTL.
    async fn set_by_short(&self, mapping: &UrlMapping) -> CacheResult<()>;

    /// Stores the short code under the mapping's origin URL with the configured TTL.
    async fn set_by_origin(&self, mapping: &UrlMapping) -> CacheResult<()>;

    /// Removes both keys of a mapping.
    ///
    /// Used when a record is deleted or its origin replaced.
    async fn invalidate(&self, mapping: &UrlMapping) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
