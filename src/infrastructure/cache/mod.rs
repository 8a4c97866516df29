//! Caching layer for fast lookups in both directions.
//!
//! Provides a [`UrlCache`] trait with three implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`MemoryCache`] - In-process Moka cache
//! - [`NullCache`] - No-op implementation for testing/disabled caching

mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use memory_cache::{DEFAULT_MAX_ENTRIES, MemoryCache};
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, UrlCache, origin_key, short_key};

#[cfg(test)]
pub use service::MockUrlCache;
