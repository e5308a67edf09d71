// ABOUTME: Error types for authentication and session operations
// ABOUTME: User-facing messages for failed logins plus wrapped storage failures

use thiserror::Error;
use voxdesk_storage::StorageError;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Could not fetch user profile.")]
    ProfileUnavailable,

    #[error("Session expired or invalid")]
    InvalidSession,

    #[error("Password must be at least {0} characters")]
    WeakPassword(usize),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<voxdesk_core::ValidationError> for AuthError {
    fn from(err: voxdesk_core::ValidationError) -> Self {
        AuthError::Validation(err.to_string())
    }
}
