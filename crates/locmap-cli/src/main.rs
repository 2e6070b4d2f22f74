//! locmap CLI - Localized sitemap URL enumeration
//!
//! This is the main entry point for the locmap command-line interface.
//! Command implementations live in separate modules.

use anyhow::{Context, Result};
use clap::Parser;
use locmap_core::Config;
use std::path::PathBuf;

mod cli;
mod commands;
mod output;
mod utils;

use cli::{Cli, Commands};
use utils::logging::initialize_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    execute_command(cli)
}

fn execute_command(cli: Cli) -> Result<()> {
    let config_path = resolve_config_path(&cli)?;

    match cli.command {
        Commands::Config { path: true } => {
            commands::show_config_path(&config_path);
            Ok(())
        },

        Commands::Config { path: false } => {
            let config = load_config(&config_path)?;
            commands::show_config(&config, &config_path)
        },

        Commands::Enumerate {
            snapshot,
            filter,
            force,
            format,
        } => {
            let config = load_config(&config_path)?;
            commands::enumerate(
                &config,
                &snapshot,
                filter.as_deref(),
                force,
                format.resolve(),
                cli.quiet,
            )
        },

        Commands::Localize {
            default_lang,
            lang,
            path,
        } => {
            let config = load_config(&config_path)?;
            commands::localize_path(&config, &default_lang, &lang, &path)
        },
    }
}

/// `--config` / `LOCMAP_CONFIG`, else the platform config file.
fn resolve_config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => Config::config_path().context("Failed to locate configuration directory"),
    }
}

fn load_config(path: &std::path::Path) -> Result<Config> {
    let config = Config::load_from(path)
        .with_context(|| format!("Failed to load configuration from '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}
