//! Record store errors.

use thiserror::Error;
use wellness_way_core::ValidationError;

/// Errors that can occur when talking to the record store.
///
/// Callers in the page handlers do not distinguish between kinds; every
/// variant maps to the same generic notice for the attempted operation. The
/// variants exist so the diagnostic log says what actually went wrong.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// A single-row read matched zero or several rows.
    #[error("expected exactly one row, {}", describe_count(*.count))]
    NotSingle { count: Option<usize> },

    /// An update or delete matched no row.
    #[error("not found")]
    NotFound,

    /// Payload was rejected before reaching the store.
    #[error("invalid payload: {0}")]
    Validation(#[from] ValidationError),

    /// Response body could not be decoded into the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The client could not be built from its configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

fn describe_count(count: Option<usize>) -> String {
    count.map_or_else(|| "got a different number".to_string(), |n| format!("got {n}"))
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
