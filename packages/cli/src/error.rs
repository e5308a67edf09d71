use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use voxdesk_auth::AuthError;
use voxdesk_core::ValidationError;
use voxdesk_storage::StorageError;
use voxdesk_workflow::WorkflowError;

/// Main application error type that all handlers should return
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Storage error")]
    Storage(#[from] StorageError),
}

/// Error body; keeps the `{success, data, error}` envelope of successful responses
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    data: Option<()>,
    error: String,
    code: &'static str,
    request_id: String,
}

impl AppError {
    /// Convert AppError to appropriate HTTP status code and error code
    fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            AppError::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            AppError::Storage(storage_error) => match storage_error {
                StorageError::NotFound(_) => (StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND"),
                StorageError::Duplicate(_) => (StatusCode::CONFLICT, "DUPLICATE_ENTRY"),
                StorageError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
                StorageError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            },
        }
    }

    /// Get user-friendly error message (sanitized for external consumption)
    fn to_user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::Unauthorized { message } => message.clone(),
            AppError::Forbidden { message } => message.clone(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            AppError::Storage(storage_error) => match storage_error {
                StorageError::NotFound(what) => format!("{} not found", what),
                StorageError::Duplicate(_) => "This email is already registered".to_string(),
                StorageError::Conflict(msg) => msg.clone(),
                StorageError::Validation(msg) => msg.clone(),
                _ => "Data storage error".to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status_code, error_code) = self.to_status_and_code();
        let user_message = self.to_user_message();

        // Log internal errors with full context but don't expose details
        if status_code.is_server_error() {
            error!(
                request_id = %request_id,
                error_code = %error_code,
                error = ?self,
                "Internal server error occurred"
            );
        } else {
            info!(
                request_id = %request_id,
                error_code = %error_code,
                error = %self,
                "API error response"
            );
        }

        let body = ErrorResponse {
            success: false,
            data: None,
            error: user_message,
            code: error_code,
            request_id,
        };

        (status_code, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::ProfileUnavailable
            | AuthError::InvalidSession => AppError::unauthorized(err.to_string()),
            AuthError::WeakPassword(_) | AuthError::Validation(_) => {
                AppError::Validation(err.to_string())
            }
            AuthError::Storage(storage_error) => AppError::Storage(storage_error),
            AuthError::PasswordHash(_) => AppError::internal(err),
        }
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            // Busy or wrong state for the requested operation
            WorkflowError::Validation(msg) => AppError::Conflict(msg),
            WorkflowError::Storage(storage_error) => AppError::Storage(storage_error),
            other => AppError::internal(other),
        }
    }
}
