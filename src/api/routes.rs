//! API route configuration.

use crate::api::handlers::{
    delete_url_handler, get_url_handler, health_handler, lookup_url_handler, shorten_handler,
    update_url_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Versioned API routes, mounted under `/api/v1`.
///
/// # Endpoints
///
/// - `POST   /shorten`       - Shorten a URL (deduplicated by origin)
/// - `GET    /urls?origin=`  - Look up the code of an origin URL
/// - `GET    /urls/{code}`   - Stored record for a code
/// - `PUT    /urls/{code}`   - Replace the origin URL of a code
/// - `DELETE /urls/{code}`   - Delete a code
/// - `GET    /healthcheck`   - Repository and cache health
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls", get(lookup_url_handler))
        .route(
            "/urls/{code}",
            get(get_url_handler)
                .put(update_url_handler)
                .delete(delete_url_handler),
        )
        .route("/healthcheck", get(health_handler))
}
