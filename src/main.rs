//! pamjit entry point.
//!
//! Parses the command line and dispatches to the subcommand handlers.

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use pamjit::cli::{request, Cli, Commands};

#[tokio::main]
async fn main() {
    // Load .env file (if present) before anything else
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: failed to load .env file: {}", e);
        }
    }

    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Request(args) => request::run(args).await,
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
///
/// Logs go to stderr; stdout carries only command output such as the
/// approval link.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
