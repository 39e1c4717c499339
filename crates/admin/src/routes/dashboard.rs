//! Dashboard: tabbed listing of both tables with add and inline edit forms.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;
use tracing::instrument;
use wellness_way_core::{Ad, AdId, WebResult, WebResultId};

use super::ads::AdDraft;
use super::render_html;
use super::web_results::{WebResultDraft, parse_display_order};
use crate::filters;
use crate::notices::Notice;
use crate::state::AppState;

/// Which table the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Ads,
    Results,
}

impl Tab {
    /// Unknown or missing values fall back to the ads tab.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("results") => Self::Results,
            _ => Self::Ads,
        }
    }

    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Ads => "ads",
            Self::Results => "results",
        }
    }

    #[must_use]
    pub const fn is_ads(self) -> bool {
        matches!(self, Self::Ads)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Ad row in the listing. `edit` is set on the row whose form is open.
pub struct AdRow {
    pub id: AdId,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub edit: Option<AdDraft>,
}

impl From<Ad> for AdRow {
    fn from(ad: Ad) -> Self {
        let image_url = ad.image().map(str::to_string);
        Self {
            id: ad.id,
            title: ad.title,
            description: ad.description,
            url: ad.url,
            image_url,
            is_featured: ad.is_featured,
            edit: None,
        }
    }
}

impl AdRow {
    /// Row for an ad missing from the listing, shown from its draft.
    fn from_draft(id: AdId, draft: AdDraft) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            url: draft.url.clone(),
            image_url: Some(draft.image_url.clone()).filter(|u| !u.trim().is_empty()),
            is_featured: draft.is_featured,
            edit: Some(draft),
        }
    }
}

/// Web result row in the listing.
pub struct WebResultRow {
    pub id: WebResultId,
    pub title: String,
    pub description: String,
    pub url: String,
    pub display_order: i32,
    pub edit: Option<WebResultDraft>,
}

impl From<WebResult> for WebResultRow {
    fn from(result: WebResult) -> Self {
        Self {
            id: result.id,
            title: result.title,
            description: result.description,
            url: result.url,
            display_order: result.display_order,
            edit: None,
        }
    }
}

impl WebResultRow {
    fn from_draft(id: WebResultId, draft: WebResultDraft) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            url: draft.url.clone(),
            display_order: parse_display_order(&draft.display_order),
            edit: Some(draft),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub storefront_url: String,
    pub tab: Tab,
    pub success_message: Option<&'static str>,
    pub error_message: Option<&'static str>,
    pub ads: Vec<AdRow>,
    pub web_results: Vec<WebResultRow>,
    pub new_ad: AdDraft,
    pub new_web_result: WebResultDraft,
}

/// Row whose inline edit form is open, with the values to show in it.
#[derive(Debug, Clone, Default)]
pub enum Editing {
    #[default]
    Nothing,
    Ad(AdId, AdDraft),
    WebResult(WebResultId, WebResultDraft),
}

/// Everything the dashboard shows apart from the freshly read listings.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub tab: Tab,
    pub success: Option<Notice>,
    pub error: Option<Notice>,
    pub new_ad: AdDraft,
    pub new_web_result: WebResultDraft,
    pub editing: Editing,
}

impl Dashboard {
    #[must_use]
    pub fn on(tab: Tab) -> Self {
        Self {
            tab,
            ..Self::default()
        }
    }

    /// Show `notice`; a later notice of the same kind replaces an earlier one.
    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        if notice.is_error() {
            self.error = Some(notice);
        } else {
            self.success = Some(notice);
        }
        self
    }

    #[must_use]
    pub fn with_editing(mut self, editing: Editing) -> Self {
        self.editing = editing;
        self
    }

    /// Read both tables and render.
    ///
    /// A failed read leaves that listing empty and shows "Failed to load data",
    /// unless an error from the action being re-rendered is already shown.
    pub async fn render(mut self, state: &AppState, status: StatusCode) -> Response {
        let ads = match state.ads().list_recent().await {
            Ok(ads) => ads,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch ads");
                self.error.get_or_insert(Notice::LoadFailed);
                Vec::new()
            }
        };

        let web_results = match state.web_results().list(None).await {
            Ok(results) => results,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch web results");
                self.error.get_or_insert(Notice::LoadFailed);
                Vec::new()
            }
        };

        let mut ad_rows: Vec<AdRow> = ads.into_iter().map(AdRow::from).collect();
        let mut web_result_rows: Vec<WebResultRow> =
            web_results.into_iter().map(WebResultRow::from).collect();

        // The open form stays on screen even when its row did not load.
        match self.editing {
            Editing::Nothing => {}
            Editing::Ad(id, draft) => match ad_rows.iter_mut().find(|row| row.id == id) {
                Some(row) => row.edit = Some(draft),
                None => ad_rows.insert(0, AdRow::from_draft(id, draft)),
            },
            Editing::WebResult(id, draft) => {
                match web_result_rows.iter_mut().find(|row| row.id == id) {
                    Some(row) => row.edit = Some(draft),
                    None => web_result_rows.insert(0, WebResultRow::from_draft(id, draft)),
                }
            }
        }

        let template = DashboardTemplate {
            storefront_url: state.config().storefront_url.clone(),
            tab: self.tab,
            success_message: self.success.map(Notice::message),
            error_message: self.error.map(Notice::message),
            ads: ad_rows,
            web_results: web_result_rows,
            new_ad: self.new_ad,
            new_web_result: self.new_web_result,
        };

        render_html(&template, status)
    }
}

/// Render the dashboard.
///
/// GET /
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(params): Query<DashboardQuery>) -> Response {
    let mut dashboard = Dashboard::on(Tab::from_param(params.tab.as_deref()));

    for code in [params.success, params.error].into_iter().flatten() {
        if let Some(notice) = Notice::from_code(&code) {
            dashboard = dashboard.with_notice(notice);
        }
    }

    dashboard.render(&state, StatusCode::OK).await
}
