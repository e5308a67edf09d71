use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};

use voxdesk_cli::Config;
use voxdesk_storage::Database;

pub mod users;
pub mod waitlist;

/// Open the database named by the environment configuration
pub async fn open_database() -> Result<(Config, Database), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let db = Database::connect(&config.database_path).await?;
    Ok((config, db))
}

pub fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}
