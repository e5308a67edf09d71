// ABOUTME: Client dashboard endpoints
// ABOUTME: Mount, create, edit, save, and refresh drive the caller's configuration workflow

use axum::{extract::State, Json};
use serde::Deserialize;

use voxdesk_workflow::DashboardView;

use super::ApiResponse;
use crate::auth::ClientUser;
use crate::error::{ApiResult, AppError};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateAssistantRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditPromptRequest {
    pub system_prompt: String,
}

type DashboardResponse = ApiResult<Json<ApiResponse<DashboardView>>>;

pub async fn mount(State(state): State<AppState>, ClientUser(user): ClientUser) -> DashboardResponse {
    let workflow = state.dashboards.workflow(&user.profile.id).await;
    let view = workflow.mount().await?;
    Ok(Json(ApiResponse::success(view)))
}

pub async fn create_assistant(
    State(state): State<AppState>,
    ClientUser(user): ClientUser,
    Json(request): Json<CreateAssistantRequest>,
) -> DashboardResponse {
    if matches!(&request.name, Some(name) if name.trim().is_empty()) {
        return Err(AppError::validation("Assistant name must not be empty"));
    }

    let workflow = state.dashboards.workflow(&user.profile.id).await;
    let view = workflow.create(request.name.as_deref()).await?;
    Ok(Json(ApiResponse::success(view)))
}

pub async fn edit_prompt(
    State(state): State<AppState>,
    ClientUser(user): ClientUser,
    Json(request): Json<EditPromptRequest>,
) -> DashboardResponse {
    let workflow = state.dashboards.workflow(&user.profile.id).await;
    let view = workflow.edit_draft(request.system_prompt).await?;
    Ok(Json(ApiResponse::success(view)))
}

pub async fn save(State(state): State<AppState>, ClientUser(user): ClientUser) -> DashboardResponse {
    let workflow = state.dashboards.workflow(&user.profile.id).await;
    let view = workflow.save().await?;
    Ok(Json(ApiResponse::success(view)))
}

pub async fn refresh(
    State(state): State<AppState>,
    ClientUser(user): ClientUser,
) -> DashboardResponse {
    let workflow = state.dashboards.workflow(&user.profile.id).await;
    let view = workflow.refresh().await?;
    Ok(Json(ApiResponse::success(view)))
}
