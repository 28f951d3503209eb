//! ConferenceHub CLI - Application entry point
//!
//! CLI-based entry point that dispatches to the client commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use client_lib::{
    cli::{Cli, Commands},
    commands::{
        self,
        session::{CliSession, SessionFile},
    },
};
use common::{AppResult, ClientConfig};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::error!(code = e.code(), "Command failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    // --api-url also satisfies production's requirement for an explicit base URL.
    let config = ClientConfig::from_env_with(cli.api_url)?;
    tracing::debug!(?config, "Configuration loaded");

    let session_file = SessionFile::new(cli.session_file);
    tracing::debug!("Session file: {}", session_file.path().display());

    match cli.command {
        Commands::Login(args) => {
            let session = CliSession::open(config, session_file).await?;
            commands::auth::login(args, &session).await
        }
        Commands::Register(args) => {
            let session = CliSession::open(config, session_file).await?;
            commands::auth::register(args, session.context()).await
        }
        Commands::Whoami => {
            let session = CliSession::open(config, session_file).await?;
            commands::auth::whoami(&session).await
        }
        Commands::Logout => {
            let session = CliSession::open(config, session_file).await?;
            commands::auth::logout(&session).await
        }
        Commands::Search(args) => commands::search::execute(args).await,
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
