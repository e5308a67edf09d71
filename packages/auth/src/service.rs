// ABOUTME: Sign-in, sign-out, and session authentication
// ABOUTME: Resolves the caller's profile and the page their role lands on

use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use voxdesk_core::{validate_email, Role, UserProfile};
use voxdesk_storage::{
    Database, NewUser, ProfileStorage, SessionStorage, StorageError, UserStorage,
};

use crate::error::{AuthError, AuthResult};
use crate::password::{check_password, hash_password};
use crate::tokens::{generate_token, hash_token, verify_token_hash};

/// Landing page for a role after login
pub fn redirect_for(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::Client => "/dashboard",
    }
}

/// Result of a successful sign-in
///
/// `token` is the only copy of the bearer token; the server keeps its hash.
#[derive(Debug, Clone, Serialize)]
pub struct SignIn {
    pub token: String,
    pub expires_at: i64,
    pub profile: UserProfile,
    pub redirect_to: &'static str,
}

pub struct AuthService {
    users: UserStorage,
    profiles: ProfileStorage,
    sessions: SessionStorage,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(db: &Database, session_ttl: Duration) -> Self {
        let pool = db.pool().clone();
        Self {
            users: UserStorage::new(pool.clone()),
            profiles: ProfileStorage::new(pool.clone()),
            sessions: SessionStorage::new(pool),
            session_ttl,
        }
    }

    /// Create an account; used by operators since public signup is a waitlist
    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        full_name: Option<String>,
        role: Role,
    ) -> AuthResult<UserProfile> {
        let email = validate_email(email)?;
        let password_hash = hash_password(password)?;
        let full_name = full_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let profile = self
            .users
            .create_user(NewUser {
                email,
                password_hash,
                full_name,
                role,
            })
            .await?;

        info!("Registered {} as {}", profile.email, profile.role);
        Ok(profile)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<SignIn> {
        let email = email.trim().to_lowercase();

        let credentials = self.users.find_credentials(&email).await?;
        let stored_hash = credentials.as_ref().map(|c| c.password_hash.as_str());
        let matched = check_password(password, stored_hash).await?;

        let credentials = match credentials {
            Some(credentials) if matched => credentials,
            Some(credentials) => {
                warn!("Failed sign-in for user {}", credentials.user_id);
                return Err(AuthError::InvalidCredentials);
            }
            None => {
                debug!("Sign-in for unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let profile = match self.profiles.get_profile(&credentials.user_id).await {
            Ok(profile) => profile,
            Err(StorageError::NotFound(_)) => return Err(AuthError::ProfileUnavailable),
            Err(e) => return Err(e.into()),
        };

        let token = generate_token();
        let expires_at = (Utc::now() + self.session_ttl).timestamp();
        self.sessions
            .create_session(&profile.id, &hash_token(&token), expires_at)
            .await?;

        info!("User {} signed in as {}", profile.id, profile.role);

        Ok(SignIn {
            token,
            expires_at,
            redirect_to: redirect_for(profile.role),
            profile,
        })
    }

    /// Resolve a bearer token to the signed-in user's profile
    pub async fn authenticate(&self, token: &str) -> AuthResult<UserProfile> {
        let token_hash = hash_token(token);
        let session = self
            .sessions
            .find_active(&token_hash, Utc::now().timestamp())
            .await?
            .ok_or(AuthError::InvalidSession)?;

        if !verify_token_hash(token, &session.token_hash) {
            return Err(AuthError::InvalidSession);
        }

        match self.profiles.get_profile(&session.user_id).await {
            Ok(profile) => Ok(profile),
            Err(StorageError::NotFound(_)) => Err(AuthError::ProfileUnavailable),
            Err(e) => Err(e.into()),
        }
    }

    /// End a session; returns the user id when the token was live
    pub async fn sign_out(&self, token: &str) -> AuthResult<Option<String>> {
        let token_hash = hash_token(token);
        let session = self
            .sessions
            .find_active(&token_hash, Utc::now().timestamp())
            .await?;

        self.sessions.delete_session(&token_hash).await?;
        Ok(session.map(|s| s.user_id))
    }

    /// Set a new password for an existing account
    pub async fn reset_password(&self, email: &str, password: &str) -> AuthResult<()> {
        let email = validate_email(email)?;
        let password_hash = hash_password(password)?;

        let credentials = self
            .users
            .find_credentials(&email)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("User {}", email)))?;

        self.users
            .update_password(&credentials.user_id, &password_hash)
            .await?;
        info!("Password reset for user {}", credentials.user_id);
        Ok(())
    }

    pub async fn purge_expired_sessions(&self) -> AuthResult<u64> {
        Ok(self.sessions.purge_expired(Utc::now().timestamp()).await?)
    }
}
