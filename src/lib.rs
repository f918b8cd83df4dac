//! fleetlog library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

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
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::session::Session;
use crate::errors::AppResult;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, session: &Session) -> AppResult<()> {
    match &cli.command {
        Commands::Init => return cli::commands::init::handle(cli),
        Commands::Config { .. } => return cli::commands::config::handle(&cli.command, cfg),
        Commands::Login => return cli::commands::login::handle(session),
        _ => session.require()?,
    }

    match &cli.command {
        Commands::Vehicle { action } => cli::commands::vehicle::handle(action, cfg),
        Commands::Driver { action } => cli::commands::driver::handle(action, cfg),
        Commands::Report { action } => cli::commands::report::handle(action, cfg),
        Commands::Status { vehicle } => cli::commands::status::handle(*vehicle, cfg),
        Commands::Data { action } => cli::commands::data::handle(action, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Init | Commands::Config { .. } | Commands::Login => Ok(()),
    }
}

/// Diagnostics go to stderr; `FLEETLOG_LOG` wins over `RUST_LOG`.
fn init_tracing() {
    let filter = std::env::var("FLEETLOG_LOG")
        .ok()
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    tracing::debug!(database = %cfg.database, "configuration loaded");

    let session = Session::open(&cfg, cli.password.as_deref());
    dispatch(&cli, &cfg, &session)
}
