// ABOUTME: Core types, validation, and utilities for Voxdesk
// ABOUTME: Foundational package shared by storage, auth, workflow, and the CLI

pub mod constants;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{BusinessType, Plan, Role, UserProfile, WaitlistEntry, WaitlistSignup};

// Re-export constants
pub use constants::{database_file, voxdesk_dir};

// Re-export utilities
pub use utils::generate_short_id;

// Re-export validation
pub use validation::{truncate, validate_email, validate_waitlist_signup, ValidationError};
