use clap::Subcommand;
use colored::*;

use voxdesk_auth::AuthService;
use voxdesk_core::{truncate, Role};
use voxdesk_storage::ProfileStorage;

use super::{new_table, open_database};

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create an account that can sign in
    Add {
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Initial password (at least 8 characters)
        #[arg(short, long)]
        password: String,
        /// Account role: admin or client
        #[arg(short, long, default_value = "client")]
        role: Role,
        /// Name shown on the dashboard
        #[arg(short, long)]
        full_name: Option<String>,
    },
    /// Replace an account's password
    SetPassword {
        /// Login email
        #[arg(short, long)]
        email: String,
        /// New password (at least 8 characters)
        #[arg(short, long)]
        password: String,
    },
    /// List all accounts
    List,
}

pub async fn handle_user_command(command: UserCommands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        UserCommands::Add {
            email,
            password,
            role,
            full_name,
        } => add_user(&email, &password, role, full_name).await,
        UserCommands::SetPassword { email, password } => set_password(&email, &password).await,
        UserCommands::List => list_users().await,
    }
}

async fn add_user(
    email: &str,
    password: &str,
    role: Role,
    full_name: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (config, db) = open_database().await?;
    let auth = AuthService::new(&db, chrono::Duration::hours(config.session_ttl_hours));

    let profile = auth.register_user(email, password, full_name, role).await?;

    println!(
        "{} {} ({})",
        "✅ Created".green().bold(),
        profile.email.cyan(),
        profile.role
    );
    println!("{} {}", "ID:".dimmed(), profile.id);
    Ok(())
}

async fn set_password(email: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (config, db) = open_database().await?;
    let auth = AuthService::new(&db, chrono::Duration::hours(config.session_ttl_hours));

    auth.reset_password(email, password).await?;

    println!("{} {}", "✅ Password updated for".green().bold(), email.cyan());
    Ok(())
}

async fn list_users() -> Result<(), Box<dyn std::error::Error>> {
    let (_config, db) = open_database().await?;
    let profiles = ProfileStorage::new(db.pool().clone()).list_profiles().await?;

    if profiles.is_empty() {
        println!("{}", "No users found".yellow());
        println!("{}", "Use 'voxdesk user add' to create the first account".dimmed());
        return Ok(());
    }

    let mut table = new_table();
    table.set_header(vec!["ID", "Email", "Name", "Role", "Assistant"]);

    for profile in &profiles {
        table.add_row(vec![
            profile.id.clone(),
            profile.email.clone(),
            truncate(profile.full_name.as_deref().unwrap_or("-"), 30),
            profile.role.to_string(),
            profile.assistant_id.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }

    println!("{}", table);
    println!("Total: {} users", profiles.len().to_string().cyan());
    Ok(())
}
