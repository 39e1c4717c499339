//! Sponsored ad records (`ads` table).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::AdId;
use super::validation::{RequiredField, ValidationError, validate_required};

/// A sponsored ad as stored in the `ads` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ad {
    /// Assigned by the store on insert.
    pub id: AdId,
    pub title: String,
    pub description: String,
    /// Destination link. Not validated beyond being present.
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Ad {
    /// Image to render, if any.
    ///
    /// Rows written by older tooling may carry an empty string instead of
    /// `null`; both mean "no image".
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Editable fields of this ad, e.g. to pre-fill an edit form.
    #[must_use]
    pub fn fields(&self) -> AdFields {
        AdFields {
            title: self.title.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
            image_url: self.image().map(str::to_owned),
            is_featured: self.is_featured,
        }
    }
}

/// The editable fields of an ad.
///
/// Used as the payload of both insert and update. An update always replaces
/// every field listed here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdFields {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub is_featured: bool,
}

impl AdFields {
    /// Build a field set, storing a blank image URL as absent.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        image_url: Option<String>,
        is_featured: bool,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
            image_url: image_url.filter(|u| !u.trim().is_empty()),
            is_featured,
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
