//! The record store port.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::error::StoreError;
use crate::query::{Query, Table};

/// Table-oriented data API used for every read and write.
///
/// Rows travel as JSON objects keyed by column name; the typed repositories
/// in [`crate::repository`] convert them to and from the core record types.
/// The remote store is the single source of truth: adapters keep no cache.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Select all columns of the rows matching `query`.
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Value>, StoreError>;

    /// Select exactly one row.
    ///
    /// Fails with [`StoreError::NotSingle`] when zero or more than one row
    /// matches.
    async fn select_single(&self, table: Table, query: &Query) -> Result<Value, StoreError> {
        let mut rows = self.select(table, query).await?;
        if rows.len() != 1 {
            return Err(StoreError::NotSingle {
                count: Some(rows.len()),
            });
        }
        rows.pop().ok_or(StoreError::NotSingle { count: Some(0) })
    }

    /// Insert rows and return them as stored, with `id` and `created_at` filled in.
    async fn insert(&self, table: Table, rows: Vec<Value>) -> Result<Vec<Value>, StoreError>;

    /// Overwrite the given columns of the row with `id` and return the updated row.
    ///
    /// Fails with [`StoreError::NotFound`] when no row has that id.
    async fn update(&self, table: Table, id: Uuid, changes: Value) -> Result<Value, StoreError>;

    /// Delete the row with `id`.
    ///
    /// Fails with [`StoreError::NotFound`] when no row has that id.
    async fn delete(&self, table: Table, id: Uuid) -> Result<(), StoreError>;
}
