//! One-shot notices shown after an admin action.
//!
//! Mutating handlers redirect back to the dashboard with `?success=<code>`
//! or `?error=<code>`; the dashboard turns the code back into a message.
//! Unknown codes are dropped rather than echoed.

/// Outcome of an admin action, as shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AdAdded,
    AdUpdated,
    AdDeleted,
    WebResultAdded,
    WebResultUpdated,
    WebResultDeleted,
    LoadFailed,
    MissingFields,
    AdAddFailed,
    AdUpdateFailed,
    AdDeleteFailed,
    WebResultAddFailed,
    WebResultUpdateFailed,
    WebResultDeleteFailed,
}

const ALL: [Notice; 14] = [
    Notice::AdAdded,
    Notice::AdUpdated,
    Notice::AdDeleted,
    Notice::WebResultAdded,
    Notice::WebResultUpdated,
    Notice::WebResultDeleted,
    Notice::LoadFailed,
    Notice::MissingFields,
    Notice::AdAddFailed,
    Notice::AdUpdateFailed,
    Notice::AdDeleteFailed,
    Notice::WebResultAddFailed,
    Notice::WebResultUpdateFailed,
    Notice::WebResultDeleteFailed,
];

impl Notice {
    /// Query-string code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::AdAdded => "ad_added",
            Self::AdUpdated => "ad_updated",
            Self::AdDeleted => "ad_deleted",
            Self::WebResultAdded => "web_result_added",
            Self::WebResultUpdated => "web_result_updated",
            Self::WebResultDeleted => "web_result_deleted",
            Self::LoadFailed => "load_failed",
            Self::MissingFields => "missing_fields",
            Self::AdAddFailed => "ad_add_failed",
            Self::AdUpdateFailed => "ad_update_failed",
            Self::AdDeleteFailed => "ad_delete_failed",
            Self::WebResultAddFailed => "web_result_add_failed",
            Self::WebResultUpdateFailed => "web_result_update_failed",
            Self::WebResultDeleteFailed => "web_result_delete_failed",
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AdAdded => "Ad added successfully",
            Self::AdUpdated => "Ad updated successfully",
            Self::AdDeleted => "Ad deleted successfully",
            Self::WebResultAdded => "Web result added successfully",
            Self::WebResultUpdated => "Web result updated successfully",
            Self::WebResultDeleted => "Web result deleted successfully",
            Self::LoadFailed => "Failed to load data",
            Self::MissingFields => "Please fill in all required fields",
            Self::AdAddFailed => "Failed to add ad",
            Self::AdUpdateFailed => "Failed to update ad",
            Self::AdDeleteFailed => "Failed to delete ad",
            Self::WebResultAddFailed => "Failed to add web result",
            Self::WebResultUpdateFailed => "Failed to update web result",
            Self::WebResultDeleteFailed => "Failed to delete web result",
        }
    }

    #[must_use]
    pub const fn is_error(self) -> bool {
        !matches!(
            self,
            Self::AdAdded
                | Self::AdUpdated
                | Self::AdDeleted
                | Self::WebResultAdded
                | Self::WebResultUpdated
                | Self::WebResultDeleted
        )
    }

    /// Query parameter the code travels in.
    #[must_use]
    pub const fn param(self) -> &'static str {
        if self.is_error() { "error" } else { "success" }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        ALL.into_iter().find(|notice| notice.code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_and_are_unique() {
        for notice in ALL {
            assert_eq!(Notice::from_code(notice.code()), Some(notice));
        }
        let mut codes: Vec<_> = ALL.iter().map(|n| n.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ALL.len());
    }

    #[test]
    fn test_unknown_code_is_dropped() {
        assert_eq!(Notice::from_code("<script>"), None);
        assert_eq!(Notice::from_code(""), None);
    }

    #[test]
    fn test_messages() {
        assert_eq!(Notice::AdAdded.message(), "Ad added successfully");
        assert_eq!(Notice::LoadFailed.message(), "Failed to load data");
        assert_eq!(
            Notice::MissingFields.message(),
            "Please fill in all required fields"
        );
        assert_eq!(
            Notice::WebResultDeleteFailed.message(),
            "Failed to delete web result"
        );
    }

    #[test]
    fn test_param() {
        assert_eq!(Notice::AdDeleted.param(), "success");
        assert_eq!(Notice::AdDeleteFailed.param(), "error");
        assert_eq!(Notice::LoadFailed.param(), "error");
    }
}
