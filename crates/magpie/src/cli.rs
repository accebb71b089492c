//! CLI structure and command handlers.

use clap::{Parser, Subcommand};
use magpie_bot::{ContentAssembler, FileStateStore, Orchestrator};
use magpie_core::{BotRunner, LogSink, MagpieConfig};
use magpie_error::MagpieResult;
use magpie_models::GeminiDriver;
use magpie_rotation::{RotationController, TokioClock};
use magpie_server::{create_router, posting_schedules, ApiState, SharedBot};
use magpie_social::{NewsFetcher, PostPublisher};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Magpie - autonomous social content bot with smart generation rotation
#[derive(Parser, Debug)]
#[command(name = "magpie")]
#[command(about = "Autonomous social content bot with smart generation rotation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bot server: scheduler, HTTP API, and keep-alive pinger
    Serve,

    /// Execute one content cycle and print the report
    Run {
        /// Generate but do not publish
        #[arg(long)]
        dry_run: bool,
    },
}

/// Wire the production bot from configuration.
fn build_bot(config: &MagpieConfig, logs: &LogSink) -> Box<dyn BotRunner> {
    let controller = RotationController::new(
        config.gemini_keys.clone(),
        config.models.clone(),
        GeminiDriver::new(),
        TokioClock,
        logs.clone(),
    );
    let assembler = ContentAssembler::new(controller, config.base_hashtag.clone(), logs.clone());
    let orchestrator = Orchestrator::new(
        assembler,
        NewsFetcher::new(logs.clone()),
        PostPublisher::new(config.x_access_token.clone(), logs.clone()),
        FileStateStore::new(config.state_file.clone(), logs.clone()),
        StdRng::from_entropy(),
        logs.clone(),
    );
    Box::new(orchestrator)
}

/// Start the full server: scheduled runs, HTTP surface, keep-alive.
pub async fn serve() -> MagpieResult<()> {
    let config = MagpieConfig::from_env()?;
    let logs = LogSink::default();

    let bot: SharedBot = Arc::new(Mutex::new(build_bot(&config, &logs)));

    magpie_server::spawn_scheduler(posting_schedules(), bot.clone(), logs.clone());
    if let Some(url) = &config.keepalive_url {
        magpie_server::spawn_keepalive(url.clone(), logs.clone());
    }

    let router = create_router(ApiState::new(bot, logs.clone()));
    magpie_server::serve(router, config.port, logs).await?;
    Ok(())
}

/// Execute one cycle from the command line and print the report as JSON.
pub async fn run_once(dry_run: bool) -> MagpieResult<()> {
    let config = MagpieConfig::from_env()?;
    let logs = LogSink::default();

    let mut bot = build_bot(&config, &logs);
    let report = bot.run_cycle(dry_run).await;

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(_) => println!("{report:?}"),
    }
    Ok(())
}
