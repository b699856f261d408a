//! Guest House Booking client - command-line entry point
//!
//! # Configuration
//!
//! Sources, highest priority first:
//!
//! 1. CLI flags (`--api-url`, `--storage`)
//! 2. Environment variables (`GUESTHOUSE_API_URL`, `GUESTHOUSE_STORAGE_PATH`,
//!    `GUESTHOUSE_TIMEOUT_MS`, `GUESTHOUSE_USER_AGENT`)
//! 3. `--config <FILE>`, or `<config dir>/guesthouse/config.toml`
//! 4. Built-in defaults
//!
//! `--no-persist` keeps the session in memory for the lifetime of the
//! process instead.
//!
//! Logging is controlled by `RUST_LOG` (default `info`, `debug` with
//! `--debug`).

mod cli;
mod commands;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use guesthouse_application::ClientContext;
use guesthouse_application::ports::KeyValueStorage;
use guesthouse_domain::RouteTable;
use guesthouse_infrastructure::config::default_config_file;
use guesthouse_infrastructure::{
    ClientConfig, FileKeyValueStorage, HistoryNavigator, InMemoryStorage, ReqwestTransport,
    SystemClock, init_tracing,
};
use tracing::debug;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(if cli.debug { "debug" } else { "info" });

    let config = resolve_config(&cli)?;
    debug!(api_url = %config.api_url, storage = %config.storage_path.display(), "Configuration loaded");

    let navigator = Arc::new(HistoryNavigator::default());
    let context = ClientContext::new(
        Arc::new(ReqwestTransport::new(&config).context("Failed to create HTTP client")?),
        session_storage(&cli, &config),
        Arc::new(SystemClock::new()),
        navigator.clone(),
        RouteTable::standard()?,
    );
    context.session.restore().await;

    commands::run(cli.command, &context, navigator.as_ref()).await
}

fn session_storage(cli: &Cli, config: &ClientConfig) -> Arc<dyn KeyValueStorage> {
    if cli.no_persist {
        debug!("Session storage is in memory only");
        Arc::new(InMemoryStorage::new())
    } else {
        Arc::new(FileKeyValueStorage::new(&config.storage_path))
    }
}

fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let file = cli.config.clone().or_else(default_config_file);
    let mut config = ClientConfig::load(file.as_deref()).context("Failed to load configuration")?;
    if let Some(api_url) = &cli.api_url {
        config.api_url.clone_from(api_url);
    }
    if let Some(storage) = &cli.storage {
        config.storage_path.clone_from(storage);
    }
    Ok(config)
}
