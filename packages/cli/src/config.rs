// ABOUTME: Server configuration loaded from environment variables
// ABOUTME: Port, CORS origin, database location, sessions, and assistant platform access

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use voxdesk_config::constants::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[source] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid value for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{0} must be set to reach the assistant platform")]
    MissingApiKey(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    pub database_path: PathBuf,
    pub static_dir: Option<PathBuf>,
    pub session_ttl_hours: i64,
    pub vapi_api_key: Option<String>,
    pub vapi_base_url: String,
    pub vapi_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var(VOXDESK_API_PORT).or_else(|_| env::var(PORT)) {
            Ok(value) => value.trim().parse::<u16>().map_err(ConfigError::InvalidPort)?,
            Err(_) => DEFAULT_API_PORT,
        };

        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let cors_origin =
            env::var(VOXDESK_CORS_ORIGIN).unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());

        let database_path = env::var(VOXDESK_DATABASE_PATH)
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(voxdesk_core::database_file);

        let static_dir = env::var(VOXDESK_STATIC_DIR)
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let session_ttl_hours =
            parse_number(VOXDESK_SESSION_TTL_HOURS)?.unwrap_or(DEFAULT_SESSION_TTL_HOURS);

        let vapi_api_key = env::var(VAPI_API_KEY)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let vapi_base_url =
            env::var(VAPI_BASE_URL).unwrap_or_else(|_| DEFAULT_VAPI_BASE_URL.to_string());

        let vapi_timeout = Duration::from_secs(
            parse_number(VAPI_REQUEST_TIMEOUT_SECS)?.unwrap_or(DEFAULT_VAPI_REQUEST_TIMEOUT_SECS),
        );

        Ok(Config {
            port,
            cors_origin,
            database_path,
            static_dir,
            session_ttl_hours,
            vapi_api_key,
            vapi_base_url,
            vapi_timeout,
        })
    }

    /// API key for the assistant platform; serving without one is an error
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.vapi_api_key
            .as_deref()
            .ok_or(ConfigError::MissingApiKey(VAPI_API_KEY))
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        Err(_) => Ok(None),
    }
}
