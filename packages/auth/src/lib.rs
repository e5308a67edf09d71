// ABOUTME: Voxdesk authentication library
// ABOUTME: Email/password sign-in, bearer sessions, and role-based landing pages

pub mod error;
pub mod password;
pub mod service;
pub mod tokens;

// Re-export main types
pub use error::{AuthError, AuthResult};
pub use service::{redirect_for, AuthService, SignIn};
