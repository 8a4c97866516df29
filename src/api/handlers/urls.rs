//! Handlers for reading and maintaining stored URL records.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::urls::{
    UpdateUrlRequest, UrlDetailsResponse, UrlLookupQuery, UrlLookupResponse,
};
use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the stored record for a short code.
///
/// `GET /api/v1/urls/{code}`
pub async fn get_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlDetailsResponse>, AppError> {
    let record = state.url_service.get_record(&code).await?;
    let short_url = state.url_service.build_short_url(&record.short_code).to_string();

    Ok(Json(UrlDetailsResponse {
        code: record.short_code,
        origin_url: record.origin_url,
        short_url,
        created_at: record.created_at,
    }))
}

/// Finds the short code of an already shortened origin URL.
///
/// `GET /api/v1/urls?origin=https://example.com`
pub async fn lookup_url_handler(
    Query(query): Query<UrlLookupQuery>,
    State(state): State<AppState>,
) -> Result<Json<UrlLookupResponse>, AppError> {
    query.validate()?;

    let mapping = state.url_service.get_by_origin(&query.origin).await?;
    let short_url = state.url_service.build_short_url(&mapping.short_code).to_string();

    Ok(Json(UrlLookupResponse {
        code: mapping.short_code,
        origin_url: mapping.origin_url,
        short_url,
    }))
}

/// Points a short code at a new origin URL.
///
/// `PUT /api/v1/urls/{code}` with `{"url": "..."}`. Responds 204.
pub async fn update_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateUrlRequest>,
) -> Result<StatusCode, AppError> {
    payload.validate()?;

    state
        .url_service
        .update(&UrlRecord::new(code, payload.url))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a short code.
///
/// `DELETE /api/v1/urls/{code}`. Responds 204.
pub async fn delete_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.url_service.delete(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
