//! Ads listing page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use super::{AdCard, LOAD_FAILED, WebResultView, top_web_results};
use crate::config::Theme;
use crate::filters;
use crate::state::AppState;

/// Non-featured ads shown in the grid.
pub const ADS_GRID_LIMIT: usize = 4;

/// Ads page template.
#[derive(Template, WebTemplate)]
#[template(path = "ads.html")]
pub struct AdsTemplate {
    pub theme: Theme,
    pub ads: Vec<AdCard>,
    pub web_results: Vec<WebResultView>,
    pub notice: Option<&'static str>,
}

/// Display the ads grid.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let ads = match state
        .ads()
        .list_by_featured(false, Some(ADS_GRID_LIMIT))
        .await
    {
        Ok(ads) => Some(ads.into_iter().map(AdCard::from).collect::<Vec<_>>()),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch ads");
            None
        }
    };

    let web_results = top_web_results(&state).await;

    let notice = (ads.is_none() || web_results.is_none()).then_some(LOAD_FAILED);

    AdsTemplate {
        theme: state.config().theme,
        ads: ads.unwrap_or_default(),
        web_results: web_results.unwrap_or_default(),
        notice,
    }
}
