// ABOUTME: Data layer and persistence for Voxdesk
// ABOUTME: SQLite pool management plus user, profile, session, and waitlist storage

pub mod db;
pub mod profiles;
pub mod sessions;
pub mod users;
pub mod waitlist;

use thiserror::Error;

pub use db::Database;
pub use profiles::ProfileStorage;
pub use sessions::{SessionRecord, SessionStorage};
pub use users::{NewUser, UserCredentials, UserStorage};
pub use waitlist::WaitlistStorage;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Duplicate entry: {0}")]
    Duplicate(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid stored data: {0}")]
    InvalidData(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<voxdesk_core::ValidationError> for StorageError {
    fn from(err: voxdesk_core::ValidationError) -> Self {
        StorageError::Validation(err.to_string())
    }
}

/// Map a unique-constraint violation to `Duplicate`, anything else to `Sqlx`
pub(crate) fn map_unique_violation(err: sqlx::Error, what: &str) -> StorageError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StorageError::Duplicate(what.to_string())
        }
        _ => StorageError::Sqlx(err),
    }
}
