//! Web result repository.

use tracing::instrument;
use wellness_way_core::{WebResult, WebResultFields, WebResultId};

use super::{decode, decode_all, encode, lookup_error};
use crate::error::StoreError;
use crate::query::{Query, Table};
use crate::store::RecordStore;

/// Reads and writes for the `web_results` table.
pub struct WebResultRepository<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> WebResultRepository<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// Web results by ascending `display_order`, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read fails or a row cannot be decoded.
    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<usize>) -> Result<Vec<WebResult>, StoreError> {
        let query = Query::new().order("display_order", true).limit_opt(limit);
        decode_all(self.store.select(Table::WebResults, &query).await?)
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no web result has this id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: WebResultId) -> Result<WebResult, StoreError> {
        let query = Query::new().eq("id", id.to_string());
        let row = self
            .store
            .select_single(Table::WebResults, &query)
            .await
            .map_err(lookup_error)?;
        decode(row)
    }

    /// Insert a new web result. Blank required fields never reach the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for blank required fields, or another
    /// `StoreError` if the write fails.
    #[instrument(skip(self, fields))]
    pub async fn insert(&self, fields: &WebResultFields) -> Result<WebResult, StoreError> {
        fields.validate()?;
        let rows = self
            .store
            .insert(Table::WebResults, vec![encode(fields)?])
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Parse("insert returned no rows".to_string()))
            .and_then(decode)
    }

    /// Replace every editable field of a web result.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for blank required fields,
    /// `StoreError::NotFound` if the row does not exist, or another
    /// `StoreError` if the write fails.
    #[instrument(skip(self, fields))]
    pub async fn update(
        &self,
        id: WebResultId,
        fields: &WebResultFields,
    ) -> Result<WebResult, StoreError> {
        fields.validate()?;
        let row = self
            .store
            .update(Table::WebResults, id.as_uuid(), encode(fields)?)
            .await?;
        decode(row)
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the row does not exist, or another
    /// `StoreError` if the write fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: WebResultId) -> Result<(), StoreError> {
        self.store.delete(Table::WebResults, id.as_uuid()).await
    }
}
