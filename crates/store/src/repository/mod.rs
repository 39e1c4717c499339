//! Typed repositories over the record store.
//!
//! Each repository borrows a `&dyn RecordStore` and exposes the reads and
//! writes the pages need for one table. Row decoding happens here so the
//! handlers only ever see core types.

pub mod ads;
pub mod web_results;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::StoreError;

pub use ads::AdRepository;
pub use web_results::WebResultRepository;

fn decode<T: DeserializeOwned>(row: Value) -> Result<T, StoreError> {
    Ok(serde_json::from_value(row)?)
}

fn decode_all<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, StoreError> {
    rows.into_iter().map(decode).collect()
}

fn encode<T: Serialize>(value: &T) -> Result<Value, StoreError> {
    Ok(serde_json::to_value(value)?)
}

/// Map "no row" on a lookup by id to `NotFound`.
fn lookup_error(err: StoreError) -> StoreError {
    match err {
        StoreError::NotSingle { count: Some(0) } => StoreError::NotFound,
        other => other,
    }
}
