// ABOUTME: Account storage layer using SQLite
// ABOUTME: Creates accounts with their profile and looks up login credentials

use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use voxdesk_core::{Role, UserProfile};

use crate::{map_unique_violation, StorageError, StorageResult};

/// Input for creating an account; the password must already be hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: Role,
}

/// Credentials looked up during sign-in
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user_id: String,
    pub password_hash: String,
}

pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an account and its profile in one transaction
    pub async fn create_user(&self, input: NewUser) -> StorageResult<UserProfile> {
        let id = Uuid::new_v4().to_string();
        debug!("Creating user {} with role {}", input.email, input.role);

        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO users (id, email, password_hash) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(&input.email)
            .bind(&input.password_hash)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_unique_violation(e, &input.email))?;

        sqlx::query("INSERT INTO profiles (id, email, full_name, role) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(input.role.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(UserProfile {
            id,
            email: input.email,
            full_name: input.full_name,
            role: input.role,
            assistant_id: None,
        })
    }

    /// Look up credentials by email (case-insensitive)
    pub async fn find_credentials(&self, email: &str) -> StorageResult<Option<UserCredentials>> {
        let row = sqlx::query("SELECT id, password_hash FROM users WHERE email = ?")
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(UserCredentials {
                user_id: row.try_get("id")?,
                password_hash: row.try_get("password_hash")?,
            })),
            None => Ok(None),
        }
    }

    pub async fn update_password(&self, user_id: &str, password_hash: &str) -> StorageResult<()> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = ?, updated_at = datetime('now', 'utc') WHERE id = ?",
        )
        .bind(password_hash)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("User {}", user_id)));
        }
        Ok(())
    }
}
