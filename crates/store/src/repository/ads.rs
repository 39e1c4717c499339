//! Ad repository.

use tracing::instrument;
use wellness_way_core::{Ad, AdFields, AdId};

use super::{decode, decode_all, encode, lookup_error};
use crate::error::StoreError;
use crate::query::{Query, Table};
use crate::store::RecordStore;

/// Reads and writes for the `ads` table.
pub struct AdRepository<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> AdRepository<'a> {
    /// Create a new repository over the given store.
    #[must_use]
    pub const fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// All ads, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read fails or a row cannot be decoded.
    #[instrument(skip(self))]
    pub async fn list_recent(&self) -> Result<Vec<Ad>, StoreError> {
        let query = Query::new().order("created_at", false);
        decode_all(self.store.select(Table::Ads, &query).await?)
    }

    /// Ads with the given featured flag, in store order, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read fails or a row cannot be decoded.
    #[instrument(skip(self))]
    pub async fn list_by_featured(
        &self,
        featured: bool,
        limit: Option<usize>,
    ) -> Result<Vec<Ad>, StoreError> {
        let query = Query::new().eq("is_featured", featured).limit_opt(limit);
        decode_all(self.store.select(Table::Ads, &query).await?)
    }

    /// The one featured ad.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotSingle` when no ad or more than one ad is
    /// featured, or another `StoreError` if the read fails.
    #[instrument(skip(self))]
    pub async fn featured(&self) -> Result<Ad, StoreError> {
        let query = Query::new().eq("is_featured", true);
        decode(self.store.select_single(Table::Ads, &query).await?)
    }

    /// Look up an ad by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no ad has this id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: AdId) -> Result<Ad, StoreError> {
        let query = Query::new().eq("id", id.to_string());
        let row = self
            .store
            .select_single(Table::Ads, &query)
            .await
            .map_err(lookup_error)?;
        decode(row)
    }

    /// Insert a new ad.
    ///
    /// Blank required fields are rejected before the store is called.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for blank required fields, or another
    /// `StoreError` if the write fails.
    #[instrument(skip(self, fields))]
    pub async fn insert(&self, fields: &AdFields) -> Result<Ad, StoreError> {
        fields.validate()?;
        let rows = self.store.insert(Table::Ads, vec![encode(fields)?]).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Parse("insert returned no rows".to_string()))
            .and_then(decode)
    }

    /// Replace every editable field of an ad.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for blank required fields,
    /// `StoreError::NotFound` if the ad does not exist, or another
    /// `StoreError` if the write fails.
    #[instrument(skip(self, fields))]
    pub async fn update(&self, id: AdId, fields: &AdFields) -> Result<Ad, StoreError> {
        fields.validate()?;
        let row = self
            .store
            .update(Table::Ads, id.as_uuid(), encode(fields)?)
            .await?;
        decode(row)
    }

    /// Delete an ad.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the ad does not exist, or another
    /// `StoreError` if the write fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: AdId) -> Result<(), StoreError> {
        self.store.delete(Table::Ads, id.as_uuid()).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::memory::{MemoryStore, StoreCall};

    fn fields(title: &str, featured: bool) -> AdFields {
        AdFields::new(title, "B. C.", "https://x.test", None, featured)
    }

    #[tokio::test]
    async fn test_insert_then_list() {
        let store = MemoryStore::new();
        let repo = AdRepository::new(&store);

        let ad = repo
            .insert(&AdFields::new(
                "A",
                "B. C.",
                "https://x.test",
                Some(String::new()),
                false,
            ))
            .await
            .unwrap();

        let ads = repo.list_recent().await.unwrap();
        assert_eq!(ads.len(), 1);
        assert_eq!(ads[0].id, ad.id);
        assert_eq!(ads[0].title, "A");
        assert_eq!(ads[0].description, "B. C.");
        assert_eq!(ads[0].url, "https://x.test");
        assert_eq!(ads[0].image_url, None);
        assert!(!ads[0].is_featured);
    }

    #[tokio::test]
    async fn test_insert_rejects_blank_without_calling_store() {
        let store = MemoryStore::new();
        let repo = AdRepository::new(&store);

        let err = repo.insert(&fields("  ", false)).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_featured_requires_exactly_one() {
        let store = MemoryStore::new();
        let repo = AdRepository::new(&store);

        assert!(matches!(
            repo.featured().await.unwrap_err(),
            StoreError::NotSingle { count: Some(0) }
        ));

        let first = repo.insert(&fields("first", true)).await.unwrap();
        assert_eq!(repo.featured().await.unwrap().id, first.id);

        repo.insert(&fields("second", true)).await.unwrap();
        assert!(matches!(
            repo.featured().await.unwrap_err(),
            StoreError::NotSingle { count: Some(2) }
        ));
    }

    #[tokio::test]
    async fn test_list_by_featured_limits() {
        let store = MemoryStore::new();
        let repo = AdRepository::new(&store);
        for i in 0..6 {
            repo.insert(&fields(&format!("ad {i}"), false)).await.unwrap();
        }
        repo.insert(&fields("hero", true)).await.unwrap();

        let ads = repo.list_by_featured(false, Some(4)).await.unwrap();
        assert_eq!(ads.len(), 4);
        assert!(ads.iter().all(|ad| !ad.is_featured));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let store = MemoryStore::new();
        let repo = AdRepository::new(&store);
        let ad = repo.insert(&fields("old", false)).await.unwrap();

        let changed = AdFields::new(
            "new",
            "D.",
            "https://y.test",
            Some("https://img.test/a.png".to_string()),
            true,
        );
        repo.update(ad.id, &changed).await.unwrap();

        let reloaded = repo.get(ad.id).await.unwrap();
        assert_eq!(reloaded.fields(), changed);
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let store = MemoryStore::new();
        let repo = AdRepository::new(&store);

        let err = repo.get(AdId::new(uuid::Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_removes() {
        let store = MemoryStore::new();
        let repo = AdRepository::new(&store);
        let ad = repo.insert(&fields("gone", false)).await.unwrap();

        repo.delete(ad.id).await.unwrap();

        assert!(repo.list_recent().await.unwrap().is_empty());
        assert!(store.calls().contains(&StoreCall::Delete(Table::Ads)));
    }
}
