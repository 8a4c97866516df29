//! DTOs for URL record management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Replacement origin for an existing short code.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUrlRequest {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,
}

/// Query for `GET /api/v1/urls?origin=...`.
#[derive(Debug, Deserialize, Validate)]
pub struct UrlLookupQuery {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub origin: String,
}

/// Full record, read from the repository.
#[derive(Debug, Serialize)]
pub struct UrlDetailsResponse {
    pub code: String,
    pub origin_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct UrlLookupResponse {
    pub code: String,
    pub origin_url: String,
    pub short_url: String,
}
