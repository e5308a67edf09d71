use clap::Subcommand;
use colored::*;

use voxdesk_core::truncate;
use voxdesk_storage::WaitlistStorage;

use super::{new_table, open_database};

#[derive(Subcommand)]
pub enum WaitlistCommands {
    /// List waitlist signups, newest first
    List,
}

pub async fn handle_waitlist_command(
    command: WaitlistCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        WaitlistCommands::List => list_waitlist().await,
    }
}

async fn list_waitlist() -> Result<(), Box<dyn std::error::Error>> {
    let (_config, db) = open_database().await?;
    let entries = WaitlistStorage::new(db.pool().clone()).list().await?;

    if entries.is_empty() {
        println!("{}", "Nobody has joined the waitlist yet".yellow());
        return Ok(());
    }

    let mut table = new_table();
    table.set_header(vec![
        "Email", "Name", "Business", "Type", "Plan", "Calls/week", "Updates", "Joined",
    ]);

    for entry in &entries {
        table.add_row(vec![
            entry.email.clone(),
            truncate(&entry.full_name, 25),
            truncate(&entry.business_name, 25),
            entry.business_type.clone().unwrap_or_else(|| "-".to_string()),
            entry.plan.display_name().to_string(),
            entry.calls_per_week.clone().unwrap_or_else(|| "-".to_string()),
            if entry.subscribe_updates { "yes" } else { "no" }.to_string(),
            entry.created_at.clone(),
        ]);
    }

    println!("{}", table);
    println!("Total: {} signups", entries.len().to_string().cyan());
    Ok(())
}
