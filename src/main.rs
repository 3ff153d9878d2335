//! Pereirinha registration back-office
//!
//! Main application entry point

use anyhow::Context;
use clap::{Parser, Subcommand};
use pereirinha::{config::Settings, server, services::AuthService, utils::logging};

#[derive(Parser)]
#[command(name = "pereirinha", version, about = "Registration back-office for the Pereirinha youth program")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Print a bcrypt hash for the admin password setting
    HashPassword { password: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::HashPassword { password }) = &cli.command {
        println!("{}", AuthService::hash_password(password)?);
        return Ok(());
    }

    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load settings")?;
    settings.validate()?;

    // Guard must outlive the server for file logs to flush
    let _log_guard = logging::init_logging(&settings.logging)?;

    tracing::info!("Starting {}...", pereirinha::info());
    server::run(settings).await?;

    Ok(())
}
