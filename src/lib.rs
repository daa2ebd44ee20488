//! rpayclock library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (calculators, logic layer, storage).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use crate::core::access::Caller;
use errors::AppResult;
use utils::path::resolve_db_path;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let caller = Caller::resolve(cfg, cli.user.as_ref(), &cli.roles);

    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Employee { .. } => cli::commands::employee::handle(&cli.command, cfg, &caller),
        Commands::Punch { .. } => cli::commands::punch::handle(&cli.command, cfg, &caller),
        Commands::Holiday { .. } => cli::commands::holiday::handle(&cli.command, cfg, &caller),
        Commands::Leave { .. } => cli::commands::leave::handle(&cli.command, cfg, &caller),
        Commands::Attendance { .. } => {
            cli::commands::attendance::handle(&cli.command, cfg, &caller)
        }
        Commands::Course { .. } => cli::commands::course::handle(&cli.command, cfg, &caller),
        Commands::Anomalies { .. } => {
            cli::commands::anomalies::handle(&cli.command, cfg, &caller)
        }
        Commands::Report { .. } => cli::commands::report::handle(&cli.command, cfg, &caller),
        Commands::Verify { .. } => cli::commands::verify::handle(&cli.command, cfg, &caller),
        Commands::Forecast { .. } => cli::commands::forecast::handle(&cli.command, cfg, &caller),
        Commands::Payroll { .. } => cli::commands::payroll::handle(&cli.command, cfg, &caller),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once
    let mut cfg = Config::load()?;

    // --db wins over the configured database
    if let Some(custom_db) = &cli.db {
        cfg.database = resolve_db_path(custom_db, &Config::config_dir())
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg)
}
