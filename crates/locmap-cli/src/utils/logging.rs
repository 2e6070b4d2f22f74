//! Logging initialization and configuration.
//!
//! This module handles setting up the tracing subscriber and color control
//! based on CLI flags and environment variables.

use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::{Cli, Commands};
use crate::output::OutputFormat;

/// Initialize the logging subsystem based on CLI flags.
///
/// Sets the log level based on verbosity flags and suppresses warnings
/// when machine-readable output (JSON/NDJSON) is requested.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let machine_output = match &cli.command {
        Commands::Enumerate { format, .. } => {
            matches!(format.resolve(), OutputFormat::Json | OutputFormat::Ndjson)
        },
        Commands::Localize { .. } | Commands::Config { .. } => false,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose, cli.quiet, machine_output))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Color control: disable when requested, NO_COLOR is set, or when emitting machine output
    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    if cli.no_color || env_no_color || machine_output {
        color_control::set_override(false);
    }
    Ok(())
}

/// Verbose always wins; machine output keeps stderr to errors only.
const fn log_level(verbose: bool, quiet: bool, machine_output: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else if quiet || machine_output {
        Level::ERROR
    } else {
        Level::WARN
    }
}
