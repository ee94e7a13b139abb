//! rworklog library root.
//! Exposes the CLI parser, the high-level run() function, and the tracking
//! core for embedding or testing.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod storage;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Start { .. } => cli::commands::start::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Edit { .. } => cli::commands::edit::handle(&cli.command, cfg),
        Commands::Del { .. } => cli::commands::del::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg, cli.test),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ command-line override of the data directory
    if let Some(dir) = &cli.dir {
        cfg.data_dir = dir.clone();
    }

    // 4️⃣ logging: file for real runs, stderr for tests
    if cli.test {
        logging::init_stderr();
    } else {
        logging::init(&cfg);
    }
    tracing::debug!(data_dir = %cfg.data_dir, "configuration loaded");

    dispatch(&cli, &cfg)
}
