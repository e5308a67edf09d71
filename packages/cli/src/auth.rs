// ABOUTME: Authentication context for API requests
// ABOUTME: Resolves the bearer session token to a profile and enforces role access

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::debug;

use voxdesk_core::{Role, UserProfile};

use crate::{error::AppError, AppState};

/// Session token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Current authenticated user
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub profile: UserProfile,
}

impl CurrentUser {
    fn require(self, role: Role) -> Result<Self, AppError> {
        if self.profile.role == role {
            Ok(self)
        } else {
            debug!(user = %self.profile.id, required = %role, "Role check failed");
            Err(AppError::forbidden(format!("This page is only available to {} accounts", role)))
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::unauthorized("Sign in required"))?;

        let profile = state.auth.authenticate(token).await?;
        Ok(Self { profile })
    }
}

/// A signed-in user with the client role
#[derive(Debug, Clone)]
pub struct ClientUser(pub CurrentUser);

impl FromRequestParts<AppState> for ClientUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        Ok(Self(user.require(Role::Client)?))
    }
}

/// A signed-in user with the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        Ok(Self(user.require(Role::Admin)?))
    }
}
