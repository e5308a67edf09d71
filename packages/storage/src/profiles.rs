// ABOUTME: Profile storage layer using SQLite
// ABOUTME: Reads profiles and records the assistant linked to each account

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use voxdesk_core::{Role, UserProfile};

use crate::{StorageError, StorageResult};

pub struct ProfileStorage {
    pool: SqlitePool,
}

impl ProfileStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_profile(&self, user_id: &str) -> StorageResult<UserProfile> {
        debug!("Fetching profile: {}", user_id);

        let row = sqlx::query(
            "SELECT id, email, full_name, role, assistant_id FROM profiles WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row_to_profile(&row),
            None => Err(StorageError::NotFound(format!("Profile {}", user_id))),
        }
    }

    pub async fn list_profiles(&self) -> StorageResult<Vec<UserProfile>> {
        let rows = sqlx::query(
            "SELECT id, email, full_name, role, assistant_id FROM profiles ORDER BY created_at, email",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_profile).collect()
    }

    /// Record the assistant created for `user_id`
    ///
    /// Re-linking the same id is a no-op. Linking a different id while one is
    /// already recorded is a conflict: an account owns at most one assistant.
    pub async fn link_assistant(&self, user_id: &str, assistant_id: &str) -> StorageResult<()> {
        debug!("Linking assistant {} to profile {}", assistant_id, user_id);

        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET assistant_id = ?, updated_at = datetime('now', 'utc')
            WHERE id = ? AND (assistant_id IS NULL OR assistant_id = ?)
            "#,
        )
        .bind(assistant_id)
        .bind(user_id)
        .bind(assistant_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // Nothing updated: either the profile is missing or another assistant is linked
        let existing = self.get_profile(user_id).await?;
        Err(StorageError::Conflict(format!(
            "Profile {} is already linked to assistant {}",
            user_id,
            existing.assistant_id.unwrap_or_default()
        )))
    }
}

fn row_to_profile(row: &SqliteRow) -> StorageResult<UserProfile> {
    let role: String = row.try_get("role")?;
    let role = role
        .parse::<Role>()
        .map_err(|e| StorageError::InvalidData(e.to_string()))?;

    Ok(UserProfile {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        full_name: row.try_get("full_name")?,
        role,
        assistant_id: row.try_get("assistant_id")?,
    })
}
