//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tracing::debug;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its origin URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look the code up in the cache
/// 2. On a miss (or cache failure), read the repository and repopulate the cache
/// 3. Return 307 Temporary Redirect to the percent-encoded origin
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 503 Service Unavailable if the repository cannot be reached.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let origin_url = state.url_service.resolve(&code).await?;

    debug!(code, "Redirecting");

    Ok(Redirect::temporary(&location(&origin_url)))
}

/// Serializes the origin the way `Url` does, so non-ASCII characters are
/// percent-encoded in the `Location` header.
fn location(origin_url: &str) -> String {
    match Url::parse(origin_url) {
        Ok(url) => url.into(),
        Err(_) => origin_url.to_string(),
    }
}
