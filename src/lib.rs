//! sitesheet library root.
//! Exposes the CLI parser, the high-level `run()` function and the report
//! engine modules.

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod render;
pub mod report;
pub mod source;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Batch { .. } => cli::commands::batch::handle(cli, cfg),
        Commands::Entry { .. } => cli::commands::entry::handle(cli, cfg),
        Commands::Payroll { .. } => cli::commands::payroll::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(blobs) = &cli.blobs {
        cfg.blob_root = blobs.clone();
    }

    logging::init_logging(&cfg.log_level);
    dispatch(&cli, &cfg)
}
