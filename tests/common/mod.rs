#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use shortlink::application::services::{ShortenerSettings, UrlService};
use shortlink::domain::entities::{UrlMapping, UrlRecord};
use shortlink::domain::repositories::UrlRepository;
use shortlink::error::AppError;
use shortlink::infrastructure::cache::{CacheError, CacheResult, MemoryCache, UrlCache};
use shortlink::infrastructure::persistence::InMemoryUrlRepository;
use shortlink::routes::app_router;
use shortlink::state::AppState;

pub const PUBLIC_BASE: &str = "https://sho.rt/";

/// Settings with a short operation timeout so stalled stores fail fast.
pub fn test_settings() -> ShortenerSettings {
    let mut settings = ShortenerSettings::new(Url::parse(PUBLIC_BASE).unwrap());
    settings.operation_timeout = Duration::from_millis(200);
    settings
}

/// A service over in-memory storage and cache, with handles to both.
pub struct TestContext {
    pub repository: Arc<InMemoryUrlRepository>,
    pub cache: Arc<MemoryCache>,
    pub service: Arc<UrlService>,
}

pub fn create_test_context() -> TestContext {
    create_test_context_with(test_settings())
}

pub fn create_test_context_with(settings: ShortenerSettings) -> TestContext {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let cache = Arc::new(MemoryCache::with_ttl(Duration::from_secs(60)));
    let service = Arc::new(UrlService::new(
        repository.clone(),
        cache.clone(),
        settings,
    ));

    TestContext {
        repository,
        cache,
        service,
    }
}

pub fn create_service(
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn UrlCache>,
) -> UrlService {
    UrlService::new(repository, cache, test_settings())
}

pub fn create_test_server(service: Arc<UrlService>) -> TestServer {
    TestServer::new(app_router(AppState::new(service))).unwrap()
}

/// Cache whose every call fails.
pub struct FailingCache;

#[async_trait]
impl UrlCache for FailingCache {
    async fn get_by_short(&self, _short_code: &str) -> CacheResult<Option<UrlMapping>> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn get_by_origin(&self, _origin_url: &str) -> CacheResult<Option<UrlMapping>> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn set_by_short(&self, _mapping: &UrlMapping) -> CacheResult<()> {
        Err(CacheError::OperationError("connection refused".to_string()))
    }

    async fn set_by_origin(&self, _mapping: &UrlMapping) -> CacheResult<()> {
        Err(CacheError::OperationError("connection refused".to_string()))
    }

    async fn invalidate(&self, _mapping: &UrlMapping) -> CacheResult<()> {
        Err(CacheError::OperationError("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Repository whose every call hangs far beyond the test operation timeout.
pub struct StalledRepository;

const STALL: Duration = Duration::from_secs(30);

#[async_trait]
impl UrlRepository for StalledRepository {
    async fn create(&self, _record: &UrlRecord) -> Result<(), AppError> {
        tokio::time::sleep(STALL).await;
        Ok(())
    }

    async fn get_by_origin(&self, _origin_url: &str) -> Result<Option<UrlRecord>, AppError> {
        tokio::time::sleep(STALL).await;
        Ok(None)
    }

    async fn get_by_short(&self, _short_code: &str) -> Result<Option<UrlRecord>, AppError> {
        tokio::time::sleep(STALL).await;
        Ok(None)
    }

    async fn delete(&self, _short_code: &str) -> Result<bool, AppError> {
        tokio::time::sleep(STALL).await;
        Ok(false)
    }

    async fn update(&self, _record: &UrlRecord) -> Result<bool, AppError> {
        tokio::time::sleep(STALL).await;
        Ok(false)
    }

    async fn health_check(&self) -> bool {
        tokio::time::sleep(STALL).await;
        true
    }
}
