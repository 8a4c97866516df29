//! Rate limiting middleware using token bucket algorithm.

use anyhow::Context;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Creates a per-client-IP rate limiter.
///
/// One token is replenished every `1 / per_second` seconds, up to `burst`
/// tokens. Requests exceeding the limit receive `429 Too Many Requests`.
///
/// The key is the socket peer address, so the service must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Errors
///
/// Returns an error if `per_second` or `burst` is zero.
///
/// # Example
///
/// ```rust,ignore
/// let app = routes::app_router(state).layer(rate_limit::layer(10, 50)?);
/// ```
pub fn layer(
    per_second: u64,
    burst: u32,
) -> anyhow::Result<GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>>
{
    let period_ns = 1_000_000_000 / per_second.max(1);

    let governor_conf = GovernorConfigBuilder::default()
        .per_nanosecond(period_ns)
        .burst_size(burst)
        .finish()
        .context("Invalid rate limit configuration")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
