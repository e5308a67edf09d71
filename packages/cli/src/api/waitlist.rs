// ABOUTME: Get Started form endpoint
// ABOUTME: Validates a signup and records it on the waitlist with the chosen plan

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use voxdesk_core::{validate_waitlist_signup, WaitlistEntry, WaitlistSignup};
use voxdesk_storage::WaitlistStorage;

use super::ApiResponse;
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct WaitlistConfirmation {
    pub entry: WaitlistEntry,
    pub plan_name: &'static str,
    pub monthly_price: &'static str,
}

pub async fn join_waitlist(
    State(state): State<AppState>,
    Json(signup): Json<WaitlistSignup>,
) -> ApiResult<(StatusCode, Json<ApiResponse<WaitlistConfirmation>>)> {
    let email = validate_waitlist_signup(&signup)?;

    let entry = WaitlistStorage::new(state.db.pool().clone())
        .join(&email, &signup)
        .await?;

    let confirmation = WaitlistConfirmation {
        plan_name: entry.plan.display_name(),
        monthly_price: entry.plan.monthly_price(),
        entry,
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::success(confirmation))))
}
