// ABOUTME: Admin-only listings
// ABOUTME: Waitlist submissions and account profiles

use axum::{extract::State, Json};

use voxdesk_core::{UserProfile, WaitlistEntry};
use voxdesk_storage::{ProfileStorage, WaitlistStorage};

use super::ApiResponse;
use crate::auth::AdminUser;
use crate::error::ApiResult;
use crate::AppState;

pub async fn list_waitlist(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<ApiResponse<Vec<WaitlistEntry>>>> {
    let entries = WaitlistStorage::new(state.db.pool().clone()).list().await?;
    Ok(Json(ApiResponse::success(entries)))
}

pub async fn list_profiles(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<ApiResponse<Vec<UserProfile>>>> {
    let profiles = ProfileStorage::new(state.db.pool().clone())
        .list_profiles()
        .await?;
    Ok(Json(ApiResponse::success(profiles)))
}
