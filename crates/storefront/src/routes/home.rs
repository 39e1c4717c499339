//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;
use wellness_way_store::StoreError;

use super::{AdCard, LOAD_FAILED, WebResultView, top_web_results};
use crate::config::Theme;
use crate::filters;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub theme: Theme,
    /// The one featured ad, absent if it could not be loaded.
    pub featured: Option<AdCard>,
    pub web_results: Vec<WebResultView>,
    pub notice: Option<&'static str>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let featured = match state.ads().featured().await {
        Ok(ad) => Some(AdCard::from(ad)),
        Err(StoreError::NotSingle { count }) => {
            tracing::error!(?count, "Featured ad query did not return exactly one row");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch featured ad");
            None
        }
    };

    // Independent of the featured ad; rendered even when that read failed.
    let web_results = top_web_results(&state).await;

    let notice = (featured.is_none() || web_results.is_none()).then_some(LOAD_FAILED);

    HomeTemplate {
        theme: state.config().theme,
        featured,
        web_results: web_results.unwrap_or_default(),
        notice,
    }
}
