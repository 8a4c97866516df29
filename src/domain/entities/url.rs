//! URL record entity and its cacheable projection.

use chrono::{DateTime, Utc};

/// A shortened URL as persisted in the repository.
///
/// Both `short_code` and `origin_url` are non-empty once stored, and
/// `short_code` is unique across the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub short_code: String,
    pub origin_url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a record stamped with the current time.
    pub fn new(short_code: impl Into<String>, origin_url: impl Into<String>) -> Self {
        Self::with_created_at(short_code, origin_url, Utc::now())
    }

    pub fn with_created_at(
        short_code: impl Into<String>,
        origin_url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            short_code: short_code.into(),
            origin_url: origin_url.into(),
            created_at,
        }
    }
}

/// The part of a [`UrlRecord`] held in the cache.
///
/// Stored under two independent keys: the short code (mapping to the origin)
/// and the origin (mapping to the short code).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub short_code: String,
    pub origin_url: String,
}

impl UrlMapping {
    pub fn new(short_code: impl Into<String>, origin_url: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
            origin_url: origin_url.into(),
        }
    }
}

impl From<&UrlRecord> for UrlMapping {
    fn from(record: &UrlRecord) -> Self {
        Self::new(record.short_code.clone(), record.origin_url.clone())
    }
}

impl From<UrlRecord> for UrlMapping {
    fn from(record: UrlRecord) -> Self {
        Self::new(record.short_code, record.origin_url)
    }
}
