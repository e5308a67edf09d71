// ABOUTME: Login, logout, and current-user endpoints
// ABOUTME: Issues session tokens and resets the dashboard workflow on sign-out

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use voxdesk_auth::{redirect_for, SignIn};
use voxdesk_core::UserProfile;

use super::ApiResponse;
use crate::auth::{bearer_token, CurrentUser};
use crate::error::{ApiResult, AppError};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub signed_out: bool,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub profile: UserProfile,
    pub redirect_to: &'static str,
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<SignIn>>> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }

    let session = state.auth.sign_in(&request.email, &request.password).await?;
    Ok(Json(ApiResponse::success(session)))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<ApiResponse<LogoutResponse>>> {
    let token = bearer_token(&headers).ok_or_else(|| AppError::unauthorized("Sign in required"))?;

    let signed_out = match state.auth.sign_out(token).await? {
        Some(user_id) => {
            state.dashboards.reset(&user_id).await;
            info!("User {} signed out", user_id);
            true
        }
        None => false,
    };

    Ok(Json(ApiResponse::success(LogoutResponse { signed_out })))
}

pub async fn me(user: CurrentUser) -> Json<ApiResponse<MeResponse>> {
    let redirect_to = redirect_for(user.profile.role);
    Json(ApiResponse::success(MeResponse {
        profile: user.profile,
        redirect_to,
    }))
}
