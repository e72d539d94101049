//! Wordle Bot - CLI
//!
//! Interactive Wordle assistant with TUI and line modes, backed by a remote
//! solver service.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use wordle_bot::{
    commands::run_simple,
    config::{Config, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS},
    gateway::HttpGateway,
    interactive::{App, run_tui},
    logging::{self, LogTarget},
};

#[derive(Parser)]
#[command(
    name = "wordle_bot",
    about = "Interactive Wordle assistant: mark the clue colours, get the next guess",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Solver endpoint that receives the guess/clue history
    #[arg(short, long, global = true, env = "WORDLE_BOT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Solver request timeout in seconds
    #[arg(short, long, global = true, env = "WORDLE_BOT_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Write logs to this file (the TUI logs nowhere else)
    #[arg(long, global = true, env = "WORDLE_BOT_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default - click or type to set clue colours)
    Play,

    /// Simple CLI mode (line-based session without TUI)
    Simple,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::new(&cli.endpoint, cli.timeout, cli.log_file, cli.verbose)?;

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    let target = match (&command, config.log_file.as_deref()) {
        (_, Some(path)) => LogTarget::File(path),
        (Commands::Play, None) => LogTarget::Disabled,
        (Commands::Simple, None) => LogTarget::Stderr,
    };
    logging::init(target, config.log_level)?;

    tracing::info!(endpoint = %config.endpoint, timeout = ?config.timeout, "starting");

    let gateway = HttpGateway::new(config.endpoint.clone(), config.timeout)
        .context("Failed to set up solver gateway")?;

    match command {
        Commands::Play => run_tui(App::new(Arc::new(gateway))),
        Commands::Simple => run_simple(&gateway),
    }
}
