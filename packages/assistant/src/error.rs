//! Assistant client error types
use thiserror::Error;

/// Result type for assistant platform operations
pub type AssistantResult<T> = Result<T, AssistantError>;

#[derive(Debug, Error)]
pub enum AssistantError {
    /// Non-2xx response; the raw body is kept for diagnostics
    #[error("Assistant service returned {status}: {body}")]
    RemoteService { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AssistantError {
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        Self::RemoteService {
            status,
            body: body.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// HTTP status for remote failures
    pub fn status(&self) -> Option<u16> {
        match self {
            AssistantError::RemoteService { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_network_error(&self) -> bool {
        matches!(self, AssistantError::Network(_))
    }
}

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AssistantError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}
