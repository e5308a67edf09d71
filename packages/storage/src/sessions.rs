// ABOUTME: Login session storage
// ABOUTME: Persists hashed bearer tokens with an expiry timestamp

use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::StorageResult;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub id: String,
    pub user_id: String,
    pub token_hash: String,
    /// Unix timestamp (seconds)
    pub expires_at: i64,
}

pub struct SessionStorage {
    pool: SqlitePool,
}

impl SessionStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_session(
        &self,
        user_id: &str,
        token_hash: &str,
        expires_at: i64,
    ) -> StorageResult<SessionRecord> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO sessions (id, user_id, token_hash, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(SessionRecord {
            id,
            user_id: user_id.to_string(),
            token_hash: token_hash.to_string(),
            expires_at,
        })
    }

    /// Find a session that has not expired as of `now`
    pub async fn find_active(
        &self,
        token_hash: &str,
        now: i64,
    ) -> StorageResult<Option<SessionRecord>> {
        let row = sqlx::query(
            "SELECT id, user_id, token_hash, expires_at FROM sessions
             WHERE token_hash = ? AND expires_at > ?",
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(SessionRecord {
                id: row.try_get("id")?,
                user_id: row.try_get("user_id")?,
                token_hash: row.try_get("token_hash")?,
                expires_at: row.try_get("expires_at")?,
            })),
            None => Ok(None),
        }
    }

    /// Delete a session, returning whether one existed
    pub async fn delete_session(&self, token_hash: &str) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn purge_expired(&self, now: i64) -> StorageResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await?;

        let purged = result.rows_affected();
        if purged > 0 {
            debug!("Purged {} expired sessions", purged);
        }
        Ok(purged)
    }
}
