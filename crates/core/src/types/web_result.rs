//! Non-sponsored link records (`web_results` table).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::WebResultId;
use super::validation::{RequiredField, ValidationError, validate_required};

/// A web result as stored in the `web_results` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebResult {
    pub id: WebResultId,
    pub title: String,
    pub description: String,
    pub url: String,
    /// Sort key for display. Not unique and not contiguous.
    #[serde(default)]
    pub display_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl WebResult {
    /// Editable fields of this result, e.g. to pre-fill an edit form.
    #[must_use]
    pub fn fields(&self) -> WebResultFields {
        WebResultFields {
            title: self.title.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
            display_order: self.display_order,
        }
    }
}

/// The editable fields of a web result, used for insert and full-replace update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebResultFields {
    pub title: String,
    pub description: String,
    pub url: String,
    pub display_order: i32,
}

impl WebResultFields {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        display_order: i32,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
            display_order,
        }
    }

    /// Check that `title`, `description` and `url` are present.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming each blank required field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required(&[
            (RequiredField::Title, &self.title),
            (RequiredField::Description, &self.description),
            (RequiredField::Url, &self.url),
        ])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_store_row() {
        let row = serde_json::json!({
            "id": "1d2e3f40-5a6b-4c7d-8e9f-0a1b2c3d4e5f",
            "title": "Sleep hygiene basics",
            "description": "Ten habits for better rest.",
            "url": "https://sleep.test",
            "display_order": 2,
            "created_at": "2026-03-04T05:06:07Z"
        });

        let result: WebResult = serde_json::from_value(row).unwrap();
        assert_eq!(result.display_order, 2);
        assert_eq!(result.fields().title, "Sleep hygiene basics");
    }

    #[test]
    fn test_validate_names_every_blank_field() {
        let err = WebResultFields::new("", "", "https://x.test", 0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err.missing,
            vec![RequiredField::Title, RequiredField::Description]
        );
    }
}
