//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, UrlCache, origin_key, short_key};
use crate::domain::entities::UrlMapping;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use tracing::{debug, info};

/// Redis cache implementation for both lookup directions.
///
/// Uses a multiplexed `ConnectionManager`, so clones are cheap and a dropped
/// request future does not leak a connection. Failed commands surface as
/// [`CacheError::OperationError`]; `UrlService` logs them and falls back to
/// the repository.
pub struct RedisCache {
    client: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and configures the TTL.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `ttl_seconds` - TTL applied to both keys of every cached mapping;
    ///   controlled via `CACHE_TTL_SECONDS` env var
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            ttl_seconds,
        })
    }

    async fn get_value(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.client.clone();

        let value = conn
            .get::<_, Option<String>>(key)
            .await
            .map_err(|e| operation_error("GET", e))?;

        match value {
            Some(_) => debug!(key, "Cache HIT"),
            None => debug!(key, "Cache MISS"),
        }

        Ok(value)
    }

    async fn set_value(&self, key: &str, value: &str) -> CacheResult<()> {
        let mut conn = self.client.clone();

        conn.set_ex::<_, _, ()>(key, value, self.ttl_seconds)
            .await
            .map_err(|e| operation_error("SET", e))?;

        debug!(key, ttl = self.ttl_seconds, "Cache SET");
        Ok(())
    }
}

fn operation_error(command: &str, e: RedisError) -> CacheError {
    CacheError::OperationError(format!("Redis {command} failed: {e}"))
}

#[async_trait]
impl UrlCache for RedisCache {
    async fn get_by_short(&self, short_code: &str) -> CacheResult<Option<UrlMapping>> {
        Ok(self
            .get_value(&short_key(short_code))
            .await?
            .map(|origin_url| UrlMapping::new(short_code, origin_url)))
    }

    async fn get_by_origin(&self, origin_url: &str) -> CacheResult<Option<UrlMapping>> {
        Ok(self
            .get_value(&origin_key(origin_url))
            .await?
            .map(|short_code| UrlMapping::new(short_code, origin_url)))
    }

    async fn set_by_short(&self, mapping: &UrlMapping) -> CacheResult<()> {
        self.set_value(&short_key(&mapping.short_code), &mapping.origin_url)
            .await
    }

    async fn set_by_origin(&self, mapping: &UrlMapping) -> CacheResult<()> {
        self.set_value(&origin_key(&mapping.origin_url), &mapping.short_code)
            .await
    }

    async fn invalidate(&self, mapping: &UrlMapping) -> CacheResult<()> {
        let keys = vec![
            short_key(&mapping.short_code),
            origin_key(&mapping.origin_url),
        ];
        let mut conn = self.client.clone();

        let deleted = conn
            .del::<_, i32>(keys)
            .await
            .map_err(|e| operation_error("DEL", e))?;

        if deleted > 0 {
            debug!(short_code = %mapping.short_code, deleted, "Cache INVALIDATE");
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
