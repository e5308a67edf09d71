// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Voxdesk

// Port Configuration
pub const VOXDESK_API_PORT: &str = "VOXDESK_API_PORT";
pub const PORT: &str = "PORT"; // Legacy

// CORS Configuration
pub const VOXDESK_CORS_ORIGIN: &str = "VOXDESK_CORS_ORIGIN";

// Storage
pub const VOXDESK_DATABASE_PATH: &str = "VOXDESK_DATABASE_PATH";

// Marketing site static bundle
pub const VOXDESK_STATIC_DIR: &str = "VOXDESK_STATIC_DIR";

// Sessions
pub const VOXDESK_SESSION_TTL_HOURS: &str = "VOXDESK_SESSION_TTL_HOURS";

// Voice assistant platform
pub const VAPI_API_KEY: &str = "VAPI_API_KEY";
pub const VAPI_BASE_URL: &str = "VAPI_BASE_URL";
pub const VAPI_REQUEST_TIMEOUT_SECS: &str = "VAPI_REQUEST_TIMEOUT_SECS";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

// System Environment Variables
pub const HOME: &str = "HOME";

// Defaults
pub const DEFAULT_API_PORT: u16 = 4001;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 168;
pub const DEFAULT_VAPI_BASE_URL: &str = "https://api.vapi.ai";
pub const DEFAULT_VAPI_REQUEST_TIMEOUT_SECS: u64 = 30;
