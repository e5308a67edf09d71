// ABOUTME: Password hashing with Argon2id
// ABOUTME: PHC-format hashes are stored; plaintext passwords never leave this module

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::sync::LazyLock;

use crate::error::{AuthError, AuthResult};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash checked when the email is unknown, so both paths cost one Argon2 run
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("voxdesk-unknown-account").ok());

pub fn hash_password(password: &str) -> AuthResult<String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(MIN_PASSWORD_LENGTH));
    }

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Check a password against a stored PHC hash; malformed hashes never verify
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// `verify_password` on the blocking pool
///
/// With no stored hash the dummy hash is checked instead and the result is
/// always false.
pub async fn check_password(password: &str, stored_hash: Option<&str>) -> AuthResult<bool> {
    let known = stored_hash.is_some();
    let stored = match stored_hash {
        Some(hash) => hash.to_string(),
        None => DUMMY_HASH.clone().unwrap_or_default(),
    };
    let password = password.to_string();

    let matched = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?;
    Ok(known && matched)
}
