//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /              - Featured ad + top web results
//! GET  /ads           - Grid of non-featured ads + top web results
//! GET  /health        - Liveness
//! GET  /health/ready  - Readiness (one-row store read)
//! GET  /static/*      - Stylesheet and images
//! ```
//!
//! Pages always render. A failed read leaves its section empty and raises
//! the "Failed to load content" notice.

pub mod ads;
pub mod home;

use axum::{Router, http::Uri, routing::get};
use wellness_way_core::{Ad, WebResult, split_sentences};

use crate::error::AppError;
use crate::state::AppState;

/// Notice shown when any read on a public page fails.
pub const LOAD_FAILED: &str = "Failed to load content";

/// Web results shown under the ads on both pages.
pub const WEB_RESULTS_LIMIT: usize = 3;

/// Ad display data for templates.
#[derive(Clone)]
pub struct AdCard {
    pub title: String,
    pub description: String,
    /// Description split into sentences, one per line on the ads grid.
    pub lines: Vec<String>,
    pub url: String,
    pub image_url: Option<String>,
}

impl From<Ad> for AdCard {
    fn from(ad: Ad) -> Self {
        let image_url = ad.image().map(str::to_string);
        Self {
            lines: split_sentences(&ad.description),
            title: ad.title,
            description: ad.description,
            url: ad.url,
            image_url,
        }
    }
}

/// Web result display data for templates.
#[derive(Clone)]
pub struct WebResultView {
    pub title: String,
    pub description: String,
    pub url: String,
}

impl From<WebResult> for WebResultView {
    fn from(result: WebResult) -> Self {
        Self {
            title: result.title,
            description: result.description,
            url: result.url,
        }
    }
}

/// Top web results, or `None` if the read failed.
pub(crate) async fn top_web_results(state: &AppState) -> Option<Vec<WebResultView>> {
    match state.web_results().list(Some(WEB_RESULTS_LIMIT)).await {
        Ok(results) => Some(results.into_iter().map(WebResultView::from).collect()),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch web results");
            None
        }
    }
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/ads", get(ads::index))
}

/// Fallback for unknown paths.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

#[cfg(test)]
mod tests {
    use wellness_way_core::AdId;

    use super::*;

    #[test]
    fn test_ad_card_splits_and_drops_blank_image() {
        let ad = Ad {
            id: AdId::new(uuid::Uuid::new_v4()),
            title: "A".to_string(),
            description: "B. C.".to_string(),
            url: "https://x.test".to_string(),
            image_url: Some("  ".to_string()),
            is_featured: false,
            created_at: None,
        };

        let card = AdCard::from(ad);
        assert_eq!(card.lines, vec!["B.".to_string(), "C.".to_string()]);
        assert_eq!(card.description, "B. C.");
        assert!(card.image_url.is_none());
    }
}
