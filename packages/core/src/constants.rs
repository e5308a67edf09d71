use std::env;
use std::path::PathBuf;

use voxdesk_config::constants::HOME;

/// Get the path to the Voxdesk directory (~/.voxdesk)
pub fn voxdesk_dir() -> PathBuf {
    // HOME takes precedence so tests can redirect it
    if let Ok(home) = env::var(HOME) {
        PathBuf::from(home).join(".voxdesk")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".voxdesk")
    }
}

/// Default SQLite database location (~/.voxdesk/voxdesk.db)
pub fn database_file() -> PathBuf {
    voxdesk_dir().join("voxdesk.db")
}
