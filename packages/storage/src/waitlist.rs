// ABOUTME: Waitlist storage for Get Started form submissions
// ABOUTME: Stores one entry per email address and lists them for admins

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

use voxdesk_core::{generate_short_id, Plan, WaitlistEntry, WaitlistSignup};

use crate::{map_unique_violation, StorageError, StorageResult};

pub struct WaitlistStorage {
    pool: SqlitePool,
}

impl WaitlistStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a validated signup; `email` must already be normalized
    pub async fn join(&self, email: &str, signup: &WaitlistSignup) -> StorageResult<WaitlistEntry> {
        let id = generate_short_id();
        let plan = Plan::from_query(signup.plan.as_deref());

        sqlx::query(
            r#"
            INSERT INTO waitlist (
                id, email, full_name, business_name, phone, business_type,
                calls_per_week, best_time_to_call, ai_requests, plan, subscribe_updates
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(email)
        .bind(signup.full_name.trim())
        .bind(signup.business_name.trim())
        .bind(signup.phone.trim())
        .bind(&signup.business_type)
        .bind(&signup.calls_per_week)
        .bind(&signup.best_time_to_call)
        .bind(&signup.ai_requests)
        .bind(plan.key())
        .bind(signup.subscribe_updates)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, email))?;

        info!("Waitlist signup for {} ({})", email, plan.display_name());

        let row = sqlx::query("SELECT * FROM waitlist WHERE id = ?")
            .bind(&id)
            .fetch_one(&self.pool)
            .await?;
        row_to_entry(&row)
    }

    pub async fn list(&self) -> StorageResult<Vec<WaitlistEntry>> {
        let rows = sqlx::query("SELECT * FROM waitlist ORDER BY created_at DESC, email")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_entry).collect()
    }
}

fn row_to_entry(row: &SqliteRow) -> StorageResult<WaitlistEntry> {
    let plan: String = row.try_get("plan")?;
    let plan = match plan.as_str() {
        "entry" => Plan::Entry,
        "starter" => Plan::Starter,
        other => return Err(StorageError::InvalidData(format!("Unknown plan: {}", other))),
    };

    Ok(WaitlistEntry {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        full_name: row.try_get("full_name")?,
        business_name: row.try_get("business_name")?,
        phone: row.try_get("phone")?,
        business_type: row.try_get("business_type")?,
        calls_per_week: row.try_get("calls_per_week")?,
        best_time_to_call: row.try_get("best_time_to_call")?,
        ai_requests: row.try_get("ai_requests")?,
        plan,
        subscribe_updates: row.try_get("subscribe_updates")?,
        created_at: row.try_get("created_at")?,
    })
}
