//! Repository trait for URL record data access.

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use async_trait::async_trait;

/// Authoritative store for URL records.
///
/// Implementations must be safe for concurrent use. Absent records are
/// reported as `Ok(None)` / `Ok(false)`; the service turns those into
/// [`AppError::NotFound`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - In-process test double
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Persists a new record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    /// Returns [`AppError::Unavailable`] on storage errors.
    async fn create(&self, record: &UrlRecord) -> Result<(), AppError>;

    /// Finds a record by its origin URL.
    ///
    /// When several records share an origin, the oldest one is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on storage errors.
    async fn get_by_origin(&self, origin_url: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds a record by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on storage errors.
    async fn get_by_short(&self, short_code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Deletes a record by short code.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if none matched.
    async fn delete(&self, short_code: &str) -> Result<bool, AppError>;

    /// Replaces the origin URL of the record with `record.short_code`.
    ///
    /// `created_at` is left untouched. Returns `Ok(false)` if no record matched.
    async fn update(&self, record: &UrlRecord) -> Result<bool, AppError>;

    /// Checks if the storage backend is reachable.
    async fn health_check(&self) -> bool;
}
