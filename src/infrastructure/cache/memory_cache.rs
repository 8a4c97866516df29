//! In-process cache implementation backed by Moka.

use super::service::{CacheResult, UrlCache};
use crate::domain::entities::UrlMapping;
use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::{debug, trace};

/// Default number of entries per lookup direction.
pub const DEFAULT_MAX_ENTRIES: u64 = 100_000;

/// An in-memory two-way URL cache.
///
/// Keeps one Moka cache per lookup direction, both with the same
/// time-to-live. Suitable for single-node deployments and tests; entries are
/// not shared between processes.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    by_short: Cache<String, String>,
    by_origin: Cache<String, String>,
}

impl MemoryCache {
    /// Creates a cache holding up to `max_entries` per direction, each
    /// expiring `ttl` after insertion.
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let build = || {
            Cache::builder()
                .max_capacity(max_entries)
                .time_to_live(ttl)
                .build()
        };

        Self {
            by_short: build(),
            by_origin: build(),
        }
    }

    /// Creates a cache with [`DEFAULT_MAX_ENTRIES`] and the given TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, ttl)
    }
}

#[async_trait]
impl UrlCache for MemoryCache {
    async fn get_by_short(&self, short_code: &str) -> CacheResult<Option<UrlMapping>> {
        let hit = self.by_short.get(short_code).await;
        trace!(short_code, hit = hit.is_some(), "Memory cache lookup by short code");
        Ok(hit.map(|origin_url| UrlMapping::new(short_code, origin_url)))
    }

    async fn get_by_origin(&self, origin_url: &str) -> CacheResult<Option<UrlMapping>> {
        let hit = self.by_origin.get(origin_url).await;
        trace!(origin_url, hit = hit.is_some(), "Memory cache lookup by origin");
        Ok(hit.map(|short_code| UrlMapping::new(short_code, origin_url)))
    }

    async fn set_by_short(&self, mapping: &UrlMapping) -> CacheResult<()> {
        self.by_short
            .insert(mapping.short_code.clone(), mapping.origin_url.clone())
            .await;
        Ok(())
    }

    async fn set_by_origin(&self, mapping: &UrlMapping) -> CacheResult<()> {
        self.by_origin
            .insert(mapping.origin_url.clone(), mapping.short_code.clone())
            .await;
        Ok(())
    }

    async fn invalidate(&self, mapping: &UrlMapping) -> CacheResult<()> {
        self.by_short.invalidate(&mapping.short_code).await;
        self.by_origin.invalidate(&mapping.origin_url).await;
        debug!(short_code = %mapping.short_code, "Removed mapping from memory cache");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
