//! PostgREST adapter for the record store.
//!
//! Talks to a PostgREST-compatible API (the REST interface Supabase exposes
//! for a project's tables).
//!
//! # API Reference
//!
//! - Base URL: `{project_url}/rest/v1/{table}`
//! - Authentication: `apikey: <key>` and `Authorization: Bearer <key>`
//! - Filters: `column=eq.value`, ordering: `order=column.asc|desc`, `limit=n`
//! - Writes send `Prefer: return=representation` so the stored rows come back
//! - Single-row reads send `Accept: application/vnd.pgrst.object+json`; the
//!   API answers `406 Not Acceptable` unless exactly one row matches

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::instrument;
use url::Url;
use uuid::Uuid;

use crate::error::StoreError;
use crate::query::{Query, Table};
use crate::store::RecordStore;

/// Media type asking PostgREST for a single JSON object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// `Prefer` header value that makes writes return the affected rows.
const RETURN_REPRESENTATION: &str = "return=representation";

/// Connection settings for a PostgREST endpoint.
#[derive(Clone)]
pub struct PostgrestConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`.
    pub url: Url,
    /// API key sent as both `apikey` and bearer token.
    pub api_key: SecretString,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for PostgrestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgrestConfig")
            .field("url", &self.url.as_str())
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Record store backed by a PostgREST API.
#[derive(Clone)]
pub struct PostgrestStore {
    inner: Arc<PostgrestStoreInner>,
}

struct PostgrestStoreInner {
    client: reqwest::Client,
    rest_url: String,
}

impl PostgrestStore {
    /// Create a new PostgREST client.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &PostgrestConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();

        let key = config.api_key.expose_secret();
        headers.insert(
            "apikey",
            HeaderValue::from_str(key)
                .map_err(|e| StoreError::Config(format!("Invalid API key format: {e}")))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| StoreError::Config(format!("Invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(PostgrestStoreInner {
                client,
                rest_url: rest_endpoint(&config.url),
            }),
        })
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/{}", self.inner.rest_url, table.as_str())
    }

    /// Decode a JSON array response.
    async fn rows(response: reqwest::Response) -> Result<Vec<Value>, StoreError> {
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Parse(format!("Failed to parse response: {e}")))
    }

    /// Pass success responses through, turn anything else into `StoreError::Api`.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(StoreError::Api {
            status,
            message: error_message(&body),
        })
    }
}

#[async_trait]
impl RecordStore for PostgrestStore {
    #[instrument(skip(self), fields(table = %table))]
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Value>, StoreError> {
        let response = self
            .inner
            .client
            .get(self.table_url(table))
            .query(&query_params(query))
            .send()
            .await?;

        Self::rows(response).await
    }

    #[instrument(skip(self), fields(table = %table))]
    async fn select_single(&self, table: Table, query: &Query) -> Result<Value, StoreError> {
        let response = self
            .inner
            .client
            .get(self.table_url(table))
            .query(&query_params(query))
            .header(ACCEPT, SINGLE_OBJECT)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_ACCEPTABLE {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::NotSingle {
                count: row_count_from_error(&body),
            });
        }

        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Parse(format!("Failed to parse response: {e}")))
    }

    #[instrument(skip(self, rows), fields(table = %table, count = rows.len()))]
    async fn insert(&self, table: Table, rows: Vec<Value>) -> Result<Vec<Value>, StoreError> {
        let response = self
            .inner
            .client
            .post(self.table_url(table))
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&rows)
            .send()
            .await?;

        Self::rows(response).await
    }

    #[instrument(skip(self, changes), fields(table = %table))]
    async fn update(&self, table: Table, id: Uuid, changes: Value) -> Result<Value, StoreError> {
        let response = self
            .inner
            .client
            .patch(self.table_url(table))
            .query(&[id_param(id)])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&changes)
            .send()
            .await?;

        Self::rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::NotFound)
    }

    #[instrument(skip(self), fields(table = %table))]
    async fn delete(&self, table: Table, id: Uuid) -> Result<(), StoreError> {
        let response = self
            .inner
            .client
            .delete(self.table_url(table))
            .query(&[id_param(id)])
            .header("Prefer", RETURN_REPRESENTATION)
            .send()
            .await?;

        if Self::rows(response).await?.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

impl std::fmt::Debug for PostgrestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgrestStore")
            .field("rest_url", &self.inner.rest_url)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// REST root for a project URL. Accepts URLs that already end in `/rest/v1`.
fn rest_endpoint(url: &Url) -> String {
    let base = url.as_str().trim_end_matches('/');
    if base.ends_with("/rest/v1") {
        base.to_string()
    } else {
        format!("{base}/rest/v1")
    }
}

/// Translate a query into PostgREST query-string parameters.
fn query_params(query: &Query) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];

    for filter in query.filters() {
        params.push((filter.column.clone(), eq_operand(&filter.value)));
    }

    if let Some(order) = query.ordering() {
        let direction = if order.ascending { "asc" } else { "desc" };
        params.push(("order".to_string(), format!("{}.{direction}", order.column)));
    }

    if let Some(limit) = query.row_limit() {
        params.push(("limit".to_string(), limit.to_string()));
    }

    params
}

fn id_param(id: Uuid) -> (String, String) {
    ("id".to_string(), format!("eq.{id}"))
}

/// Render an equality operand. `null` needs the `is` operator.
fn eq_operand(value: &Value) -> String {
    match value {
        Value::Null => "is.null".to_string(),
        Value::String(s) => format!("eq.{s}"),
        other => format!("eq.{other}"),
    }
}

/// Pull the human-readable message out of a PostgREST error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body.to_string())
}

/// Row count reported in a 406 body, e.g. `"The result contains 2 rows"`.
fn row_count_from_error(body: &str) -> Option<usize> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    let details = parsed.get("details")?.as_str()?;
    details
        .split_whitespace()
        .find_map(|word| word.parse::<usize>().ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pairs(params: &[(String, String)]) -> Vec<(&str, &str)> {
        params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_rest_endpoint() {
        let url = Url::parse("https://abcd.supabase.co").unwrap();
        assert_eq!(rest_endpoint(&url), "https://abcd.supabase.co/rest/v1");

        let url = Url::parse("http://localhost:54321/rest/v1/").unwrap();
        assert_eq!(rest_endpoint(&url), "http://localhost:54321/rest/v1");
    }

    #[test]
    fn test_query_params_full() {
        let query = Query::new()
            .eq("is_featured", false)
            .order("created_at", false)
            .limit(4);

        assert_eq!(
            pairs(&query_params(&query)),
            vec![
                ("select", "*"),
                ("is_featured", "eq.false"),
                ("order", "created_at.desc"),
                ("limit", "4"),
            ]
        );
    }

    #[test]
    fn test_query_params_plain_select() {
        assert_eq!(pairs(&query_params(&Query::new())), vec![("select", "*")]);
    }

    #[test]
    fn test_eq_operand() {
        assert_eq!(eq_operand(&Value::Null), "is.null");
        assert_eq!(eq_operand(&Value::from("abc")), "eq.abc");
        assert_eq!(eq_operand(&Value::from(3)), "eq.3");
        assert_eq!(eq_operand(&Value::Bool(true)), "eq.true");
    }

    #[test]
    fn test_error_message_prefers_json_message() {
        let body = r#"{"code":"23502","message":"null value in column \"title\"","details":null}"#;
        assert_eq!(error_message(body), "null value in column \"title\"");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_row_count_from_error() {
        let body = r#"{"code":"PGRST116","details":"The result contains 2 rows","message":"JSON object requested, multiple (or no) rows returned"}"#;
        assert_eq!(row_count_from_error(body), Some(2));
        assert_eq!(row_count_from_error("not json"), None);
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = PostgrestConfig {
            url: Url::parse("https://abcd.supabase.co").unwrap(),
            api_key: SecretString::from("super-secret-service-key"),
            timeout: Duration::from_secs(30),
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("abcd.supabase.co"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-service-key"));
    }
}
