use crate::errors::CommunityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient titled message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

const MISSING_FIELDS_TITLE: &str = "Missing required fields";
const NETWORK_DESCRIPTION: &str =
    "Unable to reach the server. Please check your connection and try again.";

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title, description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, description)
    }

    /// Blocked navigation to the next step.
    pub fn missing_fields_on_advance() -> Self {
        Self::new(
            NoticeLevel::Warning,
            MISSING_FIELDS_TITLE,
            "Please fill in all required fields before proceeding.",
        )
    }

    /// Blocked submission from the final step.
    pub fn missing_fields_on_submit() -> Self {
        Self::new(
            NoticeLevel::Warning,
            MISSING_FIELDS_TITLE,
            "Please fill in all required fields before submitting.",
        )
    }

    /// Failure notice for a store or network error. `fallback` is used when
    /// the error carries nothing worth showing.
    pub fn from_error(error: &CommunityError, fallback: &str) -> Self {
        let description = match error {
            CommunityError::Remote { detail, .. } if !detail.trim().is_empty() => detail.clone(),
            CommunityError::Network(_) => NETWORK_DESCRIPTION.to_string(),
            CommunityError::Validation(message) => message.clone(),
            _ => fallback.to_string(),
        };
        Self::error("Error", description)
    }
}
