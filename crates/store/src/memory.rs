//! In-process record store.
//!
//! Mirrors the PostgREST adapter's semantics (store-assigned `id` and
//! `created_at`, equality filters, single-column ordering, limits) without a
//! network. Used by the test suites and by `RECORD_STORE_BACKEND=memory`
//! local runs; contents are lost when the process exits.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::query::{Query, Table};
use crate::store::RecordStore;

/// Most recent calls kept by a [`MemoryStore`]; older ones are dropped.
pub const CALL_LOG_LIMIT: usize = 1024;

/// One call made against a [`MemoryStore`], recorded for assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCall {
    Select(Table),
    SelectSingle(Table),
    Insert(Table),
    Update(Table),
    Delete(Table),
}

impl StoreCall {
    /// Whether the call writes to the store.
    #[must_use]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Insert(_) | Self::Update(_) | Self::Delete(_))
    }
}

/// Record store held in memory.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    tables: RwLock<HashMap<Table, Vec<Value>>>,
    calls: Mutex<VecDeque<StoreCall>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the store were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Calls made so far, oldest first, up to [`CALL_LOG_LIMIT`].
    #[must_use]
    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.inner
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn record(&self, call: StoreCall) -> Result<(), StoreError> {
        {
            let mut calls = self.inner.calls.lock().unwrap_or_else(PoisonError::into_inner);
            if calls.len() == CALL_LOG_LIMIT {
                calls.pop_front();
            }
            calls.push_back(call);
        }

        if self.inner.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Api {
                status: 503,
                message: "record store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Value>, StoreError> {
        self.record(StoreCall::Select(table))?;
        Ok(self.run_query(table, query).await)
    }

    async fn select_single(&self, table: Table, query: &Query) -> Result<Value, StoreError> {
        self.record(StoreCall::SelectSingle(table))?;
        let mut rows = self.run_query(table, query).await;
        if rows.len() != 1 {
            return Err(StoreError::NotSingle {
                count: Some(rows.len()),
            });
        }
        rows.pop().ok_or(StoreError::NotSingle { count: Some(0) })
    }

    async fn insert(&self, table: Table, rows: Vec<Value>) -> Result<Vec<Value>, StoreError> {
        self.record(StoreCall::Insert(table))?;

        let mut stored = Vec::with_capacity(rows.len());
        for row in rows {
            let Value::Object(mut columns) = row else {
                return Err(StoreError::Api {
                    status: 400,
                    message: "row must be a JSON object".to_string(),
                });
            };
            columns
                .entry("id")
                .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
            columns
                .entry("created_at")
                .or_insert_with(|| Value::String(timestamp()));
            stored.push(Value::Object(columns));
        }

        self.inner
            .tables
            .write()
            .await
            .entry(table)
            .or_default()
            .extend(stored.iter().cloned());

        Ok(stored)
    }

    async fn update(&self, table: Table, id: Uuid, changes: Value) -> Result<Value, StoreError> {
        self.record(StoreCall::Update(table))?;

        let Value::Object(changes) = changes else {
            return Err(StoreError::Api {
                status: 400,
                message: "changes must be a JSON object".to_string(),
            });
        };

        let mut tables = self.inner.tables.write().await;
        let row = tables
            .get_mut(&table)
            .and_then(|rows| rows.iter_mut().find(|row| has_id(row, id)))
            .ok_or(StoreError::NotFound)?;

        if let Value::Object(columns) = &mut *row {
            for (column, value) in changes {
                // id is immutable
                if column != "id" {
                    columns.insert(column, value);
                }
            }
        }

        Ok(row.clone())
    }

    async fn delete(&self, table: Table, id: Uuid) -> Result<(), StoreError> {
        self.record(StoreCall::Delete(table))?;

        let mut tables = self.inner.tables.write().await;
        let rows = tables.get_mut(&table).ok_or(StoreError::NotFound)?;
        let before = rows.len();
        rows.retain(|row| !has_id(row, id));

        if rows.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

impl MemoryStore {
    async fn run_query(&self, table: Table, query: &Query) -> Vec<Value> {
        let tables = self.inner.tables.read().await;
        let mut rows: Vec<Value> = tables
            .get(&table)
            .map(|rows| rows.iter().filter(|row| query.matches(row)).cloned().collect())
            .unwrap_or_default();

        if let Some(order) = query.ordering() {
            rows.sort_by(|a, b| order.compare(a, b));
        }
        if let Some(limit) = query.row_limit() {
            rows.truncate(limit);
        }
        rows
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

fn has_id(row: &Value, id: Uuid) -> bool {
    row.get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        == Some(id)
}

/// Fixed-width RFC 3339 so string order matches time order.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
