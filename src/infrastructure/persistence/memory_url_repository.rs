//! In-process URL repository backed by a concurrent map.

use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};
use serde_json::json;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Repository that keeps records in memory.
///
/// Enforces the same short-code uniqueness as the database. Used by tests
/// and local runs without PostgreSQL.
#[derive(Debug, Default)]
pub struct InMemoryUrlRepository {
    records: DashMap<String, UrlRecord>,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn create(&self, record: &UrlRecord) -> Result<(), AppError> {
        match self.records.entry(record.short_code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": record.short_code }),
            )),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    async fn get_by_origin(&self, origin_url: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self
            .records
            .iter()
            .filter(|entry| entry.origin_url == origin_url)
            .min_by_key(|entry| entry.created_at)
            .map(|entry| entry.value().clone()))
    }

    async fn get_by_short(&self, short_code: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.records.get(short_code).map(|entry| entry.value().clone()))
    }

    async fn delete(&self, short_code: &str) -> Result<bool, AppError> {
        Ok(self.records.remove(short_code).is_some())
    }

    async fn update(&self, record: &UrlRecord) -> Result<bool, AppError> {
        match self.records.get_mut(&record.short_code) {
            Some(mut existing) => {
                existing.origin_url = record.origin_url.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_create_rejects_duplicate_code() {
        let repo = InMemoryUrlRepository::new();
        repo.create(&UrlRecord::new("abc", "https://a.example"))
            .await
            .unwrap();

        let err = repo
            .create(&UrlRecord::new("abc", "https://b.example"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(
            repo.get_by_short("abc").await.unwrap().unwrap().origin_url,
            "https://a.example"
        );
    }

    #[tokio::test]
    async fn test_get_by_origin_returns_oldest() {
        let repo = InMemoryUrlRepository::new();
        let now = Utc::now();
        repo.create(&UrlRecord::with_created_at("newer", "https://x.example", now))
            .await
            .unwrap();
        repo.create(&UrlRecord::with_created_at(
            "older",
            "https://x.example",
            now - Duration::hours(1),
        ))
        .await
        .unwrap();

        let found = repo.get_by_origin("https://x.example").await.unwrap().unwrap();
        assert_eq!(found.short_code, "older");
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let repo = InMemoryUrlRepository::new();
        let original = UrlRecord::new("abc", "https://a.example");
        repo.create(&original).await.unwrap();

        let updated = repo
            .update(&UrlRecord::new("abc", "https://b.example"))
            .await
            .unwrap();
        assert!(updated);

        let stored = repo.get_by_short("abc").await.unwrap().unwrap();
        assert_eq!(stored.origin_url, "https://b.example");
        assert_eq!(stored.created_at, original.created_at);
    }

    #[tokio::test]
    async fn test_missing_records() {
        let repo = InMemoryUrlRepository::new();

        assert!(repo.get_by_short("nope").await.unwrap().is_none());
        assert!(!repo.delete("nope").await.unwrap());
        assert!(
            !repo
                .update(&UrlRecord::new("nope", "https://a.example"))
                .await
                .unwrap()
        );
    }
}
