//! Integration tests for Wholesome Wellness Way.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p wellness-way-integration-tests
//! ```
//!
//! Nothing external is needed: the routers run in-process over a
//! [`MemoryStore`], and the PostgREST adapter talks to a fake server bound
//! to an ephemeral loopback port.
//!
//! # Test Categories
//!
//! - `storefront_pages` - public home and ads pages
//! - `admin_panel` - add, edit and delete flows through the admin forms
//! - `postgrest_store` - the HTTP adapter's requests and error mapping

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;
use wellness_way_core::{Ad, AdFields, WebResult, WebResultFields};
use wellness_way_store::{AdRepository, MemoryStore, WebResultRepository};

/// Storefront router over `store`, classic theme.
#[must_use]
pub fn storefront(store: &MemoryStore) -> Router {
    use wellness_way_storefront::config::{StorefrontConfig, Theme};
    use wellness_way_storefront::state::AppState;

    let config = StorefrontConfig::local(Theme::Classic);
    wellness_way_storefront::app(AppState::new(config, Arc::new(store.clone())))
}

/// Admin router over `store`.
#[must_use]
pub fn admin(store: &MemoryStore) -> Router {
    use wellness_way_admin::config::AdminConfig;
    use wellness_way_admin::state::AppState;

    wellness_way_admin::app(AppState::new(AdminConfig::local(), Arc::new(store.clone())))
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Redirect target, or "" when there is none.
    #[must_use]
    pub fn location(&self) -> &str {
        self.header(header::LOCATION.as_str())
    }

    #[must_use]
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();

    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

/// GET `uri`.
pub async fn get(router: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    send(router, request).await
}

/// POST a urlencoded form body to `uri`.
pub async fn post_form(router: &Router, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    send(router, request).await
}

/// Insert an ad directly through the repository.
pub async fn seed_ad(store: &MemoryStore, title: &str, description: &str, featured: bool) -> Ad {
    AdRepository::new(store)
        .insert(&AdFields::new(
            title,
            description,
            "https://ads.test",
            None,
            featured,
        ))
        .await
        .expect("seed ad")
}

/// Insert a web result directly through the repository.
pub async fn seed_web_result(store: &MemoryStore, title: &str, display_order: i32) -> WebResult {
    WebResultRepository::new(store)
        .insert(&WebResultFields::new(
            title,
            "A useful page.",
            "https://results.test/page",
            display_order,
        ))
        .await
        .expect("seed web result")
}

/// Byte offset of `needle` in `haystack`, panicking when absent.
#[must_use]
pub fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in body"))
}
