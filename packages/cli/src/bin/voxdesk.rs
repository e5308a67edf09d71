use clap::{Parser, Subcommand};
use colored::*;
use std::process;

mod cli;

use cli::users::UserCommands;
use cli::waitlist::WaitlistCommands;
use voxdesk_cli::{init_tracing, run_server, Config};

#[derive(Parser)]
#[command(name = "voxdesk")]
#[command(about = "Voxdesk - AI phone assistants for small businesses")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        #[arg(long, help = "API server port (overrides VOXDESK_API_PORT)")]
        port: Option<u16>,
    },
    /// Manage user accounts
    #[command(subcommand)]
    User(UserCommands),
    /// Inspect the waitlist
    #[command(subcommand)]
    Waitlist(WaitlistCommands),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match handle_command(cli.command).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn handle_command(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Serve { port } => {
            init_tracing();
            let mut config = Config::from_env()?;
            if let Some(port) = port {
                if port == 0 {
                    return Err("Port must be between 1 and 65535".into());
                }
                config.port = port;
            }
            println!(
                "{} {}",
                "🚀 Starting Voxdesk API on port".green().bold(),
                config.port.to_string().cyan()
            );
            run_server(config).await
        }
        Commands::User(command) => cli::users::handle_user_command(command).await,
        Commands::Waitlist(command) => cli::waitlist::handle_waitlist_command(command).await,
    }
}
