//! Magpie CLI binary.
//!
//! - `magpie serve`: run the full bot server (scheduler, HTTP API,
//!   keep-alive pinger)
//! - `magpie run [--dry-run]`: execute one content cycle and print the
//!   report

use clap::Parser;
use magpie_error::MagpieResult;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> MagpieResult<()> {
    let cli = cli::Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        cli::Commands::Serve => cli::serve().await?,
        cli::Commands::Run { dry_run } => cli::run_once(dry_run).await?,
    }

    Ok(())
}
