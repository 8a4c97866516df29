//! URL shortening, resolution and maintenance with cache-aside reads.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use serde_json::json;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::domain::entities::{UrlMapping, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheResult, UrlCache};
use crate::utils::code_generator::{CodeGenerator, DEFAULT_CODE_LENGTH, is_well_formed_code};
use crate::utils::url_validator::validate_origin;

pub const DEFAULT_MAX_CREATE_ATTEMPTS: u32 = 5;
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_millis(2000);

/// Runtime settings consumed by [`UrlService`].
#[derive(Debug, Clone)]
pub struct ShortenerSettings {
    /// Length of generated short codes.
    pub code_length: usize,
    /// Generation attempts before a create gives up with `Conflict`.
    pub max_create_attempts: u32,
    /// Upper bound for every repository and cache call.
    pub operation_timeout: Duration,
    /// Base that short codes are appended to, e.g. `https://sho.rt/`.
    pub public_base: Url,
}

impl ShortenerSettings {
    /// Settings with default code length, attempts and timeout.
    pub fn new(public_base: Url) -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_create_attempts: DEFAULT_MAX_CREATE_ATTEMPTS,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
            public_base,
        }
    }
}

/// Service for creating, resolving and maintaining short URLs.
///
/// The repository is authoritative. The cache is consulted first for reads
/// and populated after repository hits; its failures are logged and absorbed.
/// Repository failures and timeouts surface as [`AppError::Unavailable`].
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn UrlCache>,
    generator: CodeGenerator,
    settings: ShortenerSettings,
}

impl UrlService {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn UrlCache>,
        settings: ShortenerSettings,
    ) -> Self {
        Self {
            repository,
            cache,
            generator: CodeGenerator::new(settings.code_length),
            settings,
        }
    }

    /// Replaces the code generator, e.g. with a seeded one in tests.
    pub fn with_generator(mut self, generator: CodeGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Shortens `origin_url` and returns its short code.
    ///
    /// An origin that is already stored returns its existing code, whether
    /// found in the cache or the repository.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the origin fails validation (nothing is touched)
    /// - [`AppError::Conflict`] if every generated candidate collided
    /// - [`AppError::Unavailable`] if the repository fails or times out
    pub async fn create(&self, origin_url: &str) -> Result<String, AppError> {
        validate_origin(origin_url)?;

        if let Some(mapping) = self.cached_by_origin(origin_url).await {
            debug!(short_code = %mapping.short_code, "Origin already shortened (cache)");
            return Ok(mapping.short_code);
        }

        if let Some(record) = self
            .store("get_by_origin", self.repository.get_by_origin(origin_url))
            .await?
        {
            debug!(short_code = %record.short_code, "Origin already shortened (repository)");
            let mapping = UrlMapping::from(record);
            self.populate_cache(&mapping).await;
            return Ok(mapping.short_code);
        }

        let attempts = self.settings.max_create_attempts;

        for attempt in 1..=attempts {
            let record = UrlRecord::new(self.generator.generate(), origin_url);

            let outcome = self.store("create", self.repository.create(&record)).await;

            match outcome {
                Ok(()) => {
                    info!(short_code = %record.short_code, "Short URL created");
                    let mapping = UrlMapping::from(record);
                    self.populate_cache(&mapping).await;
                    return Ok(mapping.short_code);
                }
                Err(AppError::Conflict { .. }) => {
                    warn!(attempt, short_code = %record.short_code, "Short code collision, regenerating");
                    counter!("shortener_code_collisions_total").increment(1);
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::conflict(
            "Failed to allocate a unique short code",
            json!({ "attempts": attempts }),
        ))
    }

    /// Resolves a short code to its mapping.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code is malformed or unknown
    /// - [`AppError::Unavailable`] if the repository fails or times out
    pub async fn get_by_short(&self, short_code: &str) -> Result<UrlMapping, AppError> {
        if !is_well_formed_code(short_code) {
            return Err(short_not_found(short_code));
        }

        if let Some(mapping) = self.cached_by_short(short_code).await {
            return Ok(mapping);
        }

        let record = self
            .store("get_by_short", self.repository.get_by_short(short_code))
            .await?
            .ok_or_else(|| short_not_found(short_code))?;

        let mapping = UrlMapping::from(record);
        self.populate_cache(&mapping).await;
        Ok(mapping)
    }

    /// Resolves a short code to its origin URL.
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        self.get_by_short(short_code)
            .await
            .map(|mapping| mapping.origin_url)
    }

    /// Finds the mapping for an origin URL without creating one.
    pub async fn get_by_origin(&self, origin_url: &str) -> Result<UrlMapping, AppError> {
        validate_origin(origin_url)?;

        if let Some(mapping) = self.cached_by_origin(origin_url).await {
            return Ok(mapping);
        }

        let record = self
            .store("get_by_origin", self.repository.get_by_origin(origin_url))
            .await?
            .ok_or_else(|| {
                AppError::not_found("Origin URL not found", json!({ "origin_url": origin_url }))
            })?;

        let mapping = UrlMapping::from(record);
        self.populate_cache(&mapping).await;
        Ok(mapping)
    }

    /// Reads the full record from the repository, bypassing the cache.
    pub async fn get_record(&self, short_code: &str) -> Result<UrlRecord, AppError> {
        if !is_well_formed_code(short_code) {
            return Err(short_not_found(short_code));
        }

        self.store("get_by_short", self.repository.get_by_short(short_code))
            .await?
            .ok_or_else(|| short_not_found(short_code))
    }

    /// Deletes a record and drops both of its cache keys.
    pub async fn delete(&self, short_code: &str) -> Result<(), AppError> {
        let existing = self.get_record(short_code).await?;

        if !self
            .store("delete", self.repository.delete(short_code))
            .await?
        {
            return Err(short_not_found(short_code));
        }

        info!(short_code, "Short URL deleted");
        self.invalidate(&UrlMapping::from(existing)).await;
        Ok(())
    }

    /// Points an existing short code at a new origin URL.
    ///
    /// Only `record.origin_url` is written; `created_at` is kept. The previous
    /// mapping is evicted from the cache and repopulated on the next read.
    pub async fn update(&self, record: &UrlRecord) -> Result<(), AppError> {
        validate_origin(&record.origin_url)?;

        let previous = self.get_record(&record.short_code).await?;

        if !self
            .store("update", self.repository.update(record))
            .await?
        {
            return Err(short_not_found(&record.short_code));
        }

        info!(short_code = %record.short_code, "Short URL updated");
        self.invalidate(&UrlMapping::from(previous)).await;
        Ok(())
    }

    /// Builds the public short URL for a code.
    pub fn build_short_url(&self, short_code: &str) -> Url {
        let mut url = self.settings.public_base.clone();
        let path = format!("{}/{}", url.path().trim_end_matches('/'), short_code);
        url.set_path(&path);
        url
    }

    pub async fn repository_healthy(&self) -> bool {
        timeout(self.settings.operation_timeout, self.repository.health_check())
            .await
            .unwrap_or(false)
    }

    pub async fn cache_healthy(&self) -> bool {
        timeout(self.settings.operation_timeout, self.cache.health_check())
            .await
            .unwrap_or(false)
    }

    async fn store<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        match timeout(self.settings.operation_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                error!(
                    operation,
                    timeout_ms = self.settings.operation_timeout.as_millis() as u64,
                    "Repository call timed out"
                );
                Err(AppError::unavailable(
                    "Storage timed out",
                    json!({ "operation": operation }),
                ))
            }
        }
    }

    async fn cache_call<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = CacheResult<T>>,
    ) -> Option<T> {
        match timeout(self.settings.operation_timeout, call).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                warn!(operation, error = %e, "Cache call failed, continuing without cache");
                None
            }
            Err(_) => {
                warn!(operation, "Cache call timed out, continuing without cache");
                None
            }
        }
    }

    async fn cached_by_short(&self, short_code: &str) -> Option<UrlMapping> {
        let hit = self
            .cache_call("get_by_short", self.cache.get_by_short(short_code))
            .await
            .flatten();
        record_lookup("short", hit.is_some());
        hit
    }

    async fn cached_by_origin(&self, origin_url: &str) -> Option<UrlMapping> {
        let hit = self
            .cache_call("get_by_origin", self.cache.get_by_origin(origin_url))
            .await
            .flatten();
        record_lookup("origin", hit.is_some());
        hit
    }

    async fn populate_cache(&self, mapping: &UrlMapping) {
        tokio::join!(
            self.cache_call("set_by_origin", self.cache.set_by_origin(mapping)),
            self.cache_call("set_by_short", self.cache.set_by_short(mapping)),
        );
    }

    async fn invalidate(&self, mapping: &UrlMapping) {
        self.cache_call("invalidate", self.cache.invalidate(mapping))
            .await;
    }
}

fn short_not_found(short_code: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "code": short_code }))
}

fn record_lookup(direction: &'static str, hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!("shortener_cache_lookups_total", "direction" => direction, "result" => result)
        .increment(1);
}
