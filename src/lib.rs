//! crewtime library root.
//! Exposes the CLI parser, the high-level run() function and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cmd = &cli.command;
    match cmd {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(cmd, cfg),
        Commands::Db { .. } => commands::db::handle(cmd, cfg),
        Commands::Log { .. } => commands::log::handle(cmd, cfg),
        Commands::Crew { .. } => commands::crew::handle(cmd, cfg),
        Commands::Member { .. } => commands::member::handle(cmd, cfg),
        Commands::Schedule { .. } => commands::schedule::handle(cmd, cfg),
        Commands::Confirm { .. } | Commands::Correct { .. } => commands::verify::handle(cmd, cfg),
        Commands::Breakdown { .. } => commands::breakdown::handle(cmd, cfg),
        Commands::Submit { .. } => commands::submit::handle(cmd, cfg),
        Commands::Status { .. } => commands::status::handle(cmd, cfg),
        Commands::List { .. } => commands::list::handle(cmd, cfg),
        Commands::Del { .. } => commands::del::handle(cmd, cfg),
        Commands::Backup { .. } => commands::backup::handle(cmd, cfg),
        Commands::Export { .. } => commands::export::handle(cmd, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Config is loaded once; --db overrides the configured database.
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
