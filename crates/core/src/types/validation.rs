//! Required-field validation for admin forms.
//!
//! The only validation the site performs is "required field present":
//! a required field that is empty or whitespace-only rejects the whole
//! payload before anything is sent to the record store.

use std::fmt;

use thiserror::Error;

/// A field that must be present on an insert or update payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    Title,
    Description,
    Url,
}

impl RequiredField {
    /// Column name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Url => "url",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload rejected because required fields are blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required fields: {}", format_fields(.missing))]
pub struct ValidationError {
    /// Every blank required field, in declaration order.
    pub missing: Vec<RequiredField>,
}

fn format_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check that every listed field has non-whitespace content.
///
/// # Errors
///
/// Returns `ValidationError` naming all blank fields.
pub fn validate_required(fields: &[(RequiredField, &str)]) -> Result<(), ValidationError> {
    let missing: Vec<RequiredField> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| *field)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { missing })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_all_present() {
        let result = validate_required(&[
            (RequiredField::Title, "A"),
            (RequiredField::Description, "B"),
            (RequiredField::Url, "https://x.test"),
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_whitespace_only_is_missing() {
        let err = validate_required(&[
            (RequiredField::Title, "   "),
            (RequiredField::Description, "B"),
            (RequiredField::Url, "\t\n"),
        ])
        .unwrap_err();
        assert_eq!(err.missing, vec![RequiredField::Title, RequiredField::Url]);
        assert_eq!(err.to_string(), "missing required fields: title, url");
    }
}
