//! No-op cache implementation for testing or disabled caching.

use super::service::{CacheResult, UrlCache};
use crate::domain::entities::UrlMapping;
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when caching is disabled or Redis is unreachable at startup. Every
/// lookup misses, so the service always reads the repository.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlCache for NullCache {
    async fn get_by_short(&self, _short_code: &str) -> CacheResult<Option<UrlMapping>> {
        Ok(None)
    }

    async fn get_by_origin(&self, _origin_url: &str) -> CacheResult<Option<UrlMapping>> {
        Ok(None)
    }

    async fn set_by_short(&self, _mapping: &UrlMapping) -> CacheResult<()> {
        Ok(())
    }

    async fn set_by_origin(&self, _mapping: &UrlMapping) -> CacheResult<()> {
        Ok(())
    }

    async fn invalidate(&self, _mapping: &UrlMapping) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
