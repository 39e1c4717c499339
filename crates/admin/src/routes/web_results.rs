//! Web result management: add, inline edit, delete.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;
use wellness_way_core::{WebResult, WebResultFields, WebResultId};
use wellness_way_store::StoreError;

use super::dashboard::{Dashboard, Editing, Tab};
use super::{ConfirmDeleteTemplate, DeleteForm, back_to, render_html};
use crate::error::Result;
use crate::notices::Notice;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebResultForm {
    pub title: String,
    pub description: String,
    pub url: String,
    pub display_order: String,
}

/// Values shown in a web result form. `display_order` is kept as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebResultDraft {
    pub title: String,
    pub description: String,
    pub url: String,
    pub display_order: String,
}

impl Default for WebResultDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            url: String::new(),
            display_order: "0".to_string(),
        }
    }
}

impl WebResultDraft {
    #[must_use]
    pub fn fields(&self) -> WebResultFields {
        WebResultFields::new(
            self.title.as_str(),
            self.description.as_str(),
            self.url.as_str(),
            parse_display_order(&self.display_order),
        )
    }
}

impl From<WebResultForm> for WebResultDraft {
    fn from(form: WebResultForm) -> Self {
        Self {
            title: form.title,
            description: form.description,
            url: form.url,
            display_order: form.display_order,
        }
    }
}

impl From<&WebResult> for WebResultDraft {
    fn from(result: &WebResult) -> Self {
        Self {
            title: result.title.clone(),
            description: result.description.clone(),
            url: result.url.clone(),
            display_order: result.display_order.to_string(),
        }
    }
}

/// Read the leading integer of `input`, like a browser's `parseInt`.
///
/// Blank, non-numeric and out-of-range input all become 0.
#[must_use]
pub fn parse_display_order(input: &str) -> i32 {
    let input = input.trim();
    let digits_start = usize::from(input.starts_with(['-', '+']));
    let digits_len = input
        .get(digits_start..)
        .map_or(0, |rest| rest.bytes().take_while(u8::is_ascii_digit).count());

    input
        .get(..digits_start + digits_len)
        .and_then(|number| number.parse().ok())
        .unwrap_or(0)
}

/// Add a web result.
///
/// POST /web-results
#[instrument(skip(state, form))]
pub async fn create(State(state): State<AppState>, Form(form): Form<WebResultForm>) -> Response {
    let draft = WebResultDraft::from(form);

    match state.web_results().insert(&draft.fields()).await {
        Ok(result) => {
            tracing::info!(web_result_id = %result.id, "Web result added");
            back_to(Tab::Results, Some(Notice::WebResultAdded)).into_response()
        }
        Err(e) => {
            let (notice, status) = match e {
                StoreError::Validation(_) => {
                    (Notice::MissingFields, StatusCode::UNPROCESSABLE_ENTITY)
                }
                _ => {
                    tracing::error!(error = %e, "Failed to add web result");
                    (Notice::WebResultAddFailed, StatusCode::BAD_GATEWAY)
                }
            };
            let dashboard = Dashboard {
                new_web_result: draft,
                ..Dashboard::on(Tab::Results)
            };
            dashboard.with_notice(notice).render(&state, status).await
        }
    }
}

/// GET /web-results/{id}/edit
#[instrument(skip(state))]
pub async fn edit(State(state): State<AppState>, Path(id): Path<WebResultId>) -> Response {
    match state.web_results().get(id).await {
        Ok(result) => {
            Dashboard::on(Tab::Results)
                .with_editing(Editing::WebResult(id, WebResultDraft::from(&result)))
                .render(&state, StatusCode::OK)
                .await
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load web result for editing");
            back_to(Tab::Results, Some(Notice::LoadFailed)).into_response()
        }
    }
}

/// Save an edited web result.
///
/// POST /web-results/{id}
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<WebResultId>,
    Form(form): Form<WebResultForm>,
) -> Response {
    let draft = WebResultDraft::from(form);

    match state.web_results().update(id, &draft.fields()).await {
        Ok(_) => {
            tracing::info!(web_result_id = %id, "Web result updated");
            back_to(Tab::Results, Some(Notice::WebResultUpdated)).into_response()
        }
        Err(e) => {
            let (notice, status) = match e {
                StoreError::Validation(_) => {
                    (Notice::MissingFields, StatusCode::UNPROCESSABLE_ENTITY)
                }
                _ => {
                    tracing::error!(error = %e, "Failed to update web result");
                    (Notice::WebResultUpdateFailed, StatusCode::BAD_GATEWAY)
                }
            };
            Dashboard::on(Tab::Results)
                .with_editing(Editing::WebResult(id, draft))
                .with_notice(notice)
                .render(&state, status)
                .await
        }
    }
}

/// GET /web-results/{id}/delete
#[instrument(skip(state))]
pub async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<WebResultId>,
) -> Result<Response> {
    let result = state.web_results().get(id).await?;

    let template = ConfirmDeleteTemplate {
        storefront_url: state.config().storefront_url.clone(),
        kind: "web result",
        title: result.title,
        action: format!("/web-results/{id}/delete"),
        cancel: format!("/?tab={}", Tab::Results.param()),
    };

    Ok(render_html(&template, StatusCode::OK))
}

/// POST /web-results/{id}/delete
#[instrument(skip(state, form))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<WebResultId>,
    Form(form): Form<DeleteForm>,
) -> Response {
    if !form.confirmed() {
        return back_to(Tab::Results, None).into_response();
    }

    match state.web_results().delete(id).await {
        Ok(()) => {
            tracing::info!(web_result_id = %id, "Web result deleted");
            back_to(Tab::Results, Some(Notice::WebResultDeleted)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete web result");
            back_to(Tab::Results, Some(Notice::WebResultDeleteFailed)).into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::header::LOCATION;
    use wellness_way_store::MemoryStore;

    use super::*;
    use crate::config::AdminConfig;
    use crate::error::AppError;

    fn state_with(store: &MemoryStore) -> AppState {
        AppState::new(AdminConfig::local(), Arc::new(store.clone()))
    }

    fn form(title: &str, display_order: &str) -> WebResultForm {
        WebResultForm {
            title: title.to_string(),
            description: "Ten habits for better rest.".to_string(),
            url: "https://sleep.test".to_string(),
            display_order: display_order.to_string(),
        }
    }

    #[test]
    fn test_parse_display_order() {
        assert_eq!(parse_display_order("7"), 7);
        assert_eq!(parse_display_order(" -3 "), -3);
        assert_eq!(parse_display_order("+4"), 4);
        assert_eq!(parse_display_order("12abc"), 12);
        assert_eq!(parse_display_order("2.9"), 2);
        assert_eq!(parse_display_order(""), 0);
        assert_eq!(parse_display_order("abc"), 0);
        assert_eq!(parse_display_order("-"), 0);
        assert_eq!(parse_display_order("99999999999"), 0);
    }

    #[test]
    fn test_default_draft_order_is_zero() {
        assert_eq!(WebResultDraft::default().display_order, "0");
        assert_eq!(WebResultDraft::default().fields().display_order, 0);
    }

    #[tokio::test]
    async fn test_create_then_update_order() {
        let store = MemoryStore::new();
        let state = state_with(&store);

        let response = create(State(state.clone()), Form(form("Sleep", "5"))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[LOCATION],
            "/?tab=results&success=web_result_added"
        );

        let id = state.web_results().list(None).await.unwrap()[0].id;
        let response = update(State(state.clone()), Path(id), Form(form("Sleep", "1"))).await;
        assert_eq!(
            response.headers()[LOCATION],
            "/?tab=results&success=web_result_updated"
        );
        assert_eq!(state.web_results().get(id).await.unwrap().display_order, 1);
    }

    #[tokio::test]
    async fn test_update_with_blank_url_keeps_record() {
        let store = MemoryStore::new();
        let state = state_with(&store);
        let saved = state
            .web_results()
            .insert(&WebResultFields::new("Sleep", "Rest.", "https://sleep.test", 2))
            .await
            .unwrap();

        let mut blank = form("Sleep", "2");
        blank.url = String::new();
        let response = update(State(state.clone()), Path(saved.id), Form(blank)).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            state.web_results().get(saved.id).await.unwrap().url,
            "https://sleep.test"
        );
    }

    #[tokio::test]
    async fn test_delete_failure_redirects_with_error() {
        let store = MemoryStore::new();
        let state = state_with(&store);
        let saved = state
            .web_results()
            .insert(&WebResultFields::new("Sleep", "Rest.", "https://sleep.test", 0))
            .await
            .unwrap();
        store.set_unavailable(true);

        let confirm = DeleteForm {
            confirm: "yes".to_string(),
        };
        let response = delete(State(state), Path(saved.id), Form(confirm)).await;

        assert_eq!(
            response.headers()[LOCATION],
            "/?tab=results&error=web_result_delete_failed"
        );
    }
}
