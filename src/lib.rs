//! holical library root.
//! Exposes the CLI parser, the high-level run() function and the calendar engine.

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
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable overriding `log_level` from the config file.
pub const LOG_ENV: &str = "HOLICAL_LOG";

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
        Commands::Org { .. } => cli::commands::org::handle(&cli.command, cfg),
        Commands::Resolve { .. } => cli::commands::resolve::handle(&cli.command, cfg),
        Commands::Holiday { .. } => cli::commands::holiday::handle(&cli.command, cfg),
        Commands::Override { .. } => cli::commands::override_cmd::handle(&cli.command, cfg),
        Commands::Status { .. } => cli::commands::status::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Diagnostics go to stderr so that `resolve --json` stays parseable.
fn init_tracing(cfg: &Config) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&cfg.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // a second init (library users, tests) is not an error
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    init_tracing(&cfg);
    tracing::debug!(database = %cfg.database, "configuration loaded");

    dispatch(&cli, &cfg)
}
