//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Dashboard (?tab=ads|results&success=..&error=..)
//!
//! # Ads
//! POST /ads                       - Add ad
//! GET  /ads/{id}/edit             - Dashboard with the ad's inline edit form open
//! POST /ads/{id}                  - Save edit
//! GET  /ads/{id}/delete           - Confirmation page
//! POST /ads/{id}/delete           - Delete (requires confirm=yes)
//!
//! # Web results
//! POST /web-results               - Add web result
//! GET  /web-results/{id}/edit     - Dashboard with inline edit form open
//! POST /web-results/{id}          - Save edit
//! GET  /web-results/{id}/delete   - Confirmation page
//! POST /web-results/{id}/delete   - Delete (requires confirm=yes)
//! ```
//!
//! Successful writes redirect (303) to the dashboard, which re-reads both
//! tables. Failed adds and edits re-render the dashboard with the draft kept.

pub mod ads;
pub mod dashboard;
pub mod web_results;

use askama::Template;
use axum::{
    Router,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::filters;
use crate::notices::Notice;
use crate::state::AppState;
use dashboard::Tab;

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/ads", post(ads::create))
        .route("/ads/{id}", post(ads::update))
        .route("/ads/{id}/edit", get(ads::edit))
        .route("/ads/{id}/delete", get(ads::confirm_delete).post(ads::delete))
        .route("/web-results", post(web_results::create))
        .route("/web-results/{id}", post(web_results::update))
        .route("/web-results/{id}/edit", get(web_results::edit))
        .route(
            "/web-results/{id}/delete",
            get(web_results::confirm_delete).post(web_results::delete),
        )
}

/// Fallback for unknown paths.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Redirect to the dashboard tab, carrying an optional notice code.
#[must_use]
pub fn back_to(tab: Tab, notice: Option<Notice>) -> Redirect {
    let location = notice.map_or_else(
        || format!("/?tab={}", tab.param()),
        |n| format!("/?tab={}&{}={}", tab.param(), n.param(), n.code()),
    );
    Redirect::to(&location)
}

/// Body of the delete confirmation form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteForm {
    pub confirm: String,
}

impl DeleteForm {
    /// Only an explicit `confirm=yes` counts.
    #[must_use]
    pub fn confirmed(&self) -> bool {
        self.confirm == "yes"
    }
}

/// Delete confirmation page.
#[derive(Template)]
#[template(path = "confirm_delete.html")]
pub struct ConfirmDeleteTemplate {
    pub storefront_url: String,
    /// "ad" or "web result"
    pub kind: &'static str,
    pub title: String,
    pub action: String,
    pub cancel: String,
}

/// Render an askama template, turning a render failure into a 500.
pub(crate) fn render_html(template: &impl Template, status: StatusCode) -> Response {
    match template.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => AppError::Internal(format!("Template error: {e}")).into_response(),
    }
}
