//! # E-Vault CLI
//!
//! `evault` opens a file-backed registry, runs one command and prints the
//! result as JSON on stdout.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `warn`, written to stderr)
//! 2. Load the TOML config file, if any, and apply flag overrides
//! 3. Open the data file (exclusive lock) and the registry over it
//! 4. Execute the command
//!
//! Registry errors print `{"error": kind, "reason": text}` and exit with
//! status 1. Setup failures (unreadable config, locked data file) go through
//! `anyhow` to stderr.

mod commands;
mod config;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ev_registry::{FileBackedKVStore, Identity, RegistryError, RegistryService};

use crate::commands::{execute, Command};
use crate::config::{FileSettings, Settings};
use crate::output::ErrorView;

/// E-Vault case registry
#[derive(Parser, Debug)]
#[command(name = "evault")]
#[command(about = "Permissioned registry of judges, lawyers, clients, cases and documents")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true, env = "EVAULT_CONFIG")]
    config: Option<PathBuf>,

    /// Registry data file (overrides `data_file` in the config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Admin identity (overrides `admin` in the config)
    #[arg(long, global = true, env = "EVAULT_ADMIN")]
    admin: Option<Identity>,

    /// Identity the command is issued as
    #[arg(long, global = true, env = "EVAULT_CALLER")]
    caller: Option<Identity>,

    #[command(subcommand)]
    command: Command,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("rendering output")?
    );
    Ok(())
}

fn report(err: &RegistryError) -> Result<ExitCode> {
    print_json(&ErrorView::from(err))?;
    Ok(ExitCode::FAILURE)
}

fn main() -> Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();

    let file_settings = match &cli.config {
        Some(path) => FileSettings::load(path)?,
        None => FileSettings::default(),
    };
    let settings = Settings::resolve(file_settings, cli.admin, cli.data)?;
    debug!(?settings, "Resolved settings");

    let store = FileBackedKVStore::open(&settings.data_file)
        .with_context(|| format!("opening data file {}", settings.data_file.display()))?;

    let mut registry = match RegistryService::new(store, settings.registry_config()) {
        Ok(registry) => registry,
        Err(err) => return report(&err),
    };
    info!(admin = %settings.admin, data_file = %settings.data_file.display(), "Registry opened");

    match execute(&mut registry, cli.caller, cli.command) {
        Ok(value) => {
            print_json(&value)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report(&err),
    }
}
