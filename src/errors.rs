use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the form, storage and synchronisation layers.
#[derive(Debug, Error)]
pub enum CommunityError {
    /// A mutator addressed a field the form does not declare, or supplied a
    /// value of the wrong shape for it.
    #[error("Invalid field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },
    /// A form value could not be converted into its remote representation.
    #[error("Invalid input: {0}")]
    Validation(String),
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("HTTP error! status: {status}, details: {detail}")]
    Remote { status: u16, detail: String },
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Could not decode response: {0}")]
    Decode(String),
}

pub type Result<T> = StdResult<T, CommunityError>;

impl CommunityError {
    pub fn unknown_field(field: impl Into<String>) -> Self {
        CommunityError::InvalidField {
            field: field.into(),
            reason: "no such field on this form".into(),
        }
    }

    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CommunityError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether the failure came from talking to the backend.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            CommunityError::Network(_) | CommunityError::Remote { .. } | CommunityError::Decode(_)
        )
    }
}

impl From<std::io::Error> for CommunityError {
    fn from(err: std::io::Error) -> Self {
        CommunityError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CommunityError {
    fn from(err: serde_json::Error) -> Self {
        CommunityError::Storage(err.to_string())
    }
}

/// User-facing shell error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CommunityError),
    #[error("Input error: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Input(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}
