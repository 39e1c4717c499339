//! Ad management: add, inline edit, delete.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;
use wellness_way_core::{Ad, AdFields, AdId};
use wellness_way_store::StoreError;

use super::dashboard::{Dashboard, Editing, Tab};
use super::{ConfirmDeleteTemplate, DeleteForm, back_to, render_html};
use crate::error::Result;
use crate::notices::Notice;
use crate::state::AppState;

/// Body of the add and edit forms.
///
/// An unchecked checkbox is simply absent from the body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdForm {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
    pub is_featured: Option<String>,
}

/// Values shown in an ad form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdDraft {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
    pub is_featured: bool,
}

impl AdDraft {
    /// Payload to send to the store, values as typed. A blank image URL is
    /// stored as absent.
    #[must_use]
    pub fn fields(&self) -> AdFields {
        AdFields::new(
            self.title.as_str(),
            self.description.as_str(),
            self.url.as_str(),
            Some(self.image_url.clone()),
            self.is_featured,
        )
    }
}

impl From<AdForm> for AdDraft {
    fn from(form: AdForm) -> Self {
        Self {
            title: form.title,
            description: form.description,
            url: form.url,
            image_url: form.image_url,
            is_featured: form.is_featured.is_some(),
        }
    }
}

impl From<&Ad> for AdDraft {
    fn from(ad: &Ad) -> Self {
        Self {
            title: ad.title.clone(),
            description: ad.description.clone(),
            url: ad.url.clone(),
            image_url: ad.image().unwrap_or_default().to_string(),
            is_featured: ad.is_featured,
        }
    }
}

/// Add an ad.
///
/// POST /ads
#[instrument(skip(state, form))]
pub async fn create(State(state): State<AppState>, Form(form): Form<AdForm>) -> Response {
    let draft = AdDraft::from(form);

    match state.ads().insert(&draft.fields()).await {
        Ok(ad) => {
            tracing::info!(ad_id = %ad.id, "Ad added");
            back_to(Tab::Ads, Some(Notice::AdAdded)).into_response()
        }
        Err(StoreError::Validation(e)) => {
            tracing::debug!(error = %e, "Ad rejected");
            let dashboard = Dashboard {
                new_ad: draft,
                ..Dashboard::on(Tab::Ads)
            };
            dashboard
                .with_notice(Notice::MissingFields)
                .render(&state, StatusCode::UNPROCESSABLE_ENTITY)
                .await
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to add ad");
            let dashboard = Dashboard {
                new_ad: draft,
                ..Dashboard::on(Tab::Ads)
            };
            dashboard
                .with_notice(Notice::AdAddFailed)
                .render(&state, StatusCode::BAD_GATEWAY)
                .await
        }
    }
}

/// Open the inline edit form for an ad, pre-filled with its stored values.
///
/// GET /ads/{id}/edit
#[instrument(skip(state))]
pub async fn edit(State(state): State<AppState>, Path(id): Path<AdId>) -> Response {
    match state.ads().get(id).await {
        Ok(ad) => {
            Dashboard::on(Tab::Ads)
                .with_editing(Editing::Ad(id, AdDraft::from(&ad)))
                .render(&state, StatusCode::OK)
                .await
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load ad for editing");
            back_to(Tab::Ads, Some(Notice::LoadFailed)).into_response()
        }
    }
}

/// Save an edited ad. Every editable field is replaced.
///
/// POST /ads/{id}
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<AdId>,
    Form(form): Form<AdForm>,
) -> Response {
    let draft = AdDraft::from(form);

    match state.ads().update(id, &draft.fields()).await {
        Ok(_) => {
            tracing::info!(ad_id = %id, "Ad updated");
            back_to(Tab::Ads, Some(Notice::AdUpdated)).into_response()
        }
        Err(StoreError::Validation(e)) => {
            tracing::debug!(error = %e, "Ad edit rejected");
            Dashboard::on(Tab::Ads)
                .with_editing(Editing::Ad(id, draft))
                .with_notice(Notice::MissingFields)
                .render(&state, StatusCode::UNPROCESSABLE_ENTITY)
                .await
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to update ad");
            Dashboard::on(Tab::Ads)
                .with_editing(Editing::Ad(id, draft))
                .with_notice(Notice::AdUpdateFailed)
                .render(&state, StatusCode::BAD_GATEWAY)
                .await
        }
    }
}

/// Ask before deleting an ad.
///
/// GET /ads/{id}/delete
#[instrument(skip(state))]
pub async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<AdId>,
) -> Result<Response> {
    let ad = state.ads().get(id).await?;

    let template = ConfirmDeleteTemplate {
        storefront_url: state.config().storefront_url.clone(),
        kind: "ad",
        title: ad.title,
        action: format!("/ads/{id}/delete"),
        cancel: format!("/?tab={}", Tab::Ads.param()),
    };

    Ok(render_html(&template, StatusCode::OK))
}

/// Delete an ad once the confirmation form was submitted.
///
/// POST /ads/{id}/delete
#[instrument(skip(state, form))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<AdId>,
    Form(form): Form<DeleteForm>,
) -> Response {
    if !form.confirmed() {
        return back_to(Tab::Ads, None).into_response();
    }

    match state.ads().delete(id).await {
        Ok(()) => {
            tracing::info!(ad_id = %id, "Ad deleted");
            back_to(Tab::Ads, Some(Notice::AdDeleted)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete ad");
            back_to(Tab::Ads, Some(Notice::AdDeleteFailed)).into_response()
        }
    }
}
