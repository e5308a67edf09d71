// ABOUTME: Input validation for user-submitted data
// ABOUTME: Email format checks and waitlist form rules

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::types::{BusinessType, WaitlistSignup};

/// Upper bound for free-text form fields
pub const MAX_FIELD_LENGTH: usize = 1000;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
});

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Invalid role: {0}. Must be one of: admin, client")]
    InvalidRole(String),

    #[error("Invalid business type: {0}")]
    InvalidBusinessType(String),

    #[error("You must agree to the terms of service")]
    TermsNotAccepted,

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Validate and normalize an email address (trimmed, lowercased)
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required("Email"));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(email.to_lowercase())
}

/// Validate a Get Started submission, returning the normalized email
pub fn validate_waitlist_signup(signup: &WaitlistSignup) -> Result<String, ValidationError> {
    let email = validate_email(&signup.email)?;

    if !signup.agree_terms {
        return Err(ValidationError::TermsNotAccepted);
    }

    if let Some(kind) = signup.business_type.as_deref().filter(|k| !k.is_empty()) {
        kind.parse::<BusinessType>()?;
    }

    let free_text = [
        ("Full name", signup.full_name.as_str()),
        ("Business name", signup.business_name.as_str()),
        ("Phone", signup.phone.as_str()),
        ("AI requests", signup.ai_requests.as_deref().unwrap_or_default()),
    ];
    for (field, value) in free_text {
        if value.chars().count() > MAX_FIELD_LENGTH {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_FIELD_LENGTH,
            });
        }
    }

    Ok(email)
}

/// Truncate a string to at most `max` characters
pub fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
