//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, service wiring, and the Axum
//! server lifecycle.

use crate::api::middleware::rate_limit;
use crate::application::services::UrlService;
use crate::config::{CacheBackend, Config};
use crate::infrastructure::cache::{MemoryCache, NullCache, RedisCache, UrlCache};
use crate::infrastructure::persistence::PgUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Opens the PostgreSQL pool using the configured pool limits.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Builds the configured cache gateway.
///
/// An unreachable Redis is not fatal: the service starts with [`NullCache`]
/// and serves every read from the repository.
pub async fn build_cache(config: &Config) -> Arc<dyn UrlCache> {
    match (config.cache_backend, &config.redis_url) {
        (CacheBackend::Redis, Some(redis_url)) => {
            match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
                Ok(redis) => {
                    tracing::info!("Cache enabled (Redis)");
                    Arc::new(redis)
                }
                Err(e) => {
                    tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                    Arc::new(NullCache::new())
                }
            }
        }
        (CacheBackend::Memory, _) => {
            tracing::info!(
                max_entries = config.cache_max_entries,
                "Cache enabled (in-process)"
            );
            Arc::new(MemoryCache::new(
                config.cache_max_entries,
                Duration::from_secs(config.cache_ttl_seconds),
            ))
        }
        _ => {
            tracing::info!("Cache disabled (NullCache)");
            Arc::new(NullCache::new())
        }
    }
}

/// Connects to storage and cache and assembles the [`UrlService`].
///
/// Pending migrations are applied before the service is returned.
pub async fn build_url_service(config: &Config) -> Result<UrlService> {
    let pool = connect_database(config).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    let cache = build_cache(config).await;

    Ok(UrlService::new(
        repository,
        cache,
        config.shortener_settings()?,
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Cache gateway (Redis, in-process, or NullCache)
/// - Axum HTTP server with rate limiting and path normalization
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Rate limit configuration is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let url_service = build_url_service(&config).await?;
    let state = AppState::new(Arc::new(url_service));

    let router = app_router(state).layer(rate_limit::layer(
        config.rate_limit_per_second,
        config.rate_limit_burst,
    )?);
    let app = NormalizePathLayer::trim_trailing_slash().layer(router);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
