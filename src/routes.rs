//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`   - Short URL redirect
//! - `/api/v1/*`      - REST API, see [`crate::api::routes::api_routes`]
//!
//! Request tracing is attached here. Rate limiting and trailing-slash
//! normalization wrap the router in [`crate::server`], since both need the
//! outer service (peer address and pre-routing path rewrite).

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and tracing.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .nest("/api/v1", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}
