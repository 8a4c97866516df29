//! Handler for the shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates (or returns the existing) short URL for an origin URL.
///
/// # Endpoint
///
/// `POST /api/v1/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "code": "aZ3kP9q",
///   "short_url": "http://localhost:3000/aZ3kP9q",
///   "origin_url": "https://example.com/some/long/path"
/// }
/// ```
///
/// # Errors
///
/// - 400 `bad_request` if the body fails validation
/// - 400 `invalid_url` if the URL is not absolute http(s) with a host
/// - 409 `conflict` if no unique code could be allocated
/// - 503 `unavailable` if storage is down
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let code = state.url_service.create(&payload.url).await?;
    let short_url = state.url_service.build_short_url(&code).to_string();

    Ok(Json(ShortenResponse {
        code,
        short_url,
        origin_url: payload.url,
    }))
}
