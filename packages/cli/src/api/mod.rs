use axum::{
    routing::{get, post, put},
    Router,
};
use serde::Serialize;

use crate::AppState;

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod plans;
pub mod waitlist;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/plans", get(plans::list_plans))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/waitlist", post(waitlist::join_waitlist))
        .route("/api/dashboard", get(dashboard::mount))
        .route("/api/dashboard/assistant", post(dashboard::create_assistant))
        .route("/api/dashboard/prompt", put(dashboard::edit_prompt))
        .route("/api/dashboard/save", post(dashboard::save))
        .route("/api/dashboard/refresh", post(dashboard::refresh))
        .route("/api/admin/waitlist", get(admin::list_waitlist))
        .route("/api/admin/profiles", get(admin::list_profiles))
        .with_state(state)
}
