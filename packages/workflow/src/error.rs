// ABOUTME: Error types for the dashboard configuration workflow
// ABOUTME: Remote, network, and storage failures are shown in the view; validation is returned

use thiserror::Error;
use voxdesk_assistant::AssistantError;
use voxdesk_storage::StorageError;

pub type WorkflowResult<T> = Result<T, WorkflowError>;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Assistant service returned {status}: {body}")]
    RemoteService { status: u16, body: String },

    #[error("Could not reach the assistant service: {0}")]
    Network(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Validation(String),
}

impl WorkflowError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the caller gets this error back instead of seeing it in the view
    pub fn is_validation(&self) -> bool {
        matches!(self, WorkflowError::Validation(_))
    }
}

impl From<AssistantError> for WorkflowError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::RemoteService { status, body } => {
                WorkflowError::RemoteService { status, body }
            }
            AssistantError::Validation(msg) => WorkflowError::Validation(msg),
            AssistantError::Network(msg) => WorkflowError::Network(msg),
            AssistantError::InvalidResponse(msg) => {
                WorkflowError::Network(format!("unreadable response ({})", msg))
            }
            AssistantError::Configuration(msg) => WorkflowError::Network(msg),
        }
    }
}
