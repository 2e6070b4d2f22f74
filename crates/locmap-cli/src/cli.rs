//! # CLI Structure and Argument Parsing
//!
//! This module defines the command-line interface for `locmap`, which lists
//! the localized URLs a multilingual website should publish in its sitemap.
//! The CLI is built using `clap` with derive macros.
//!
//! ## Usage Patterns
//!
//! ```bash
//! # Every visible URL of the snapshot's current website
//! locmap enumerate --snapshot site.json
//!
//! # Only pages whose URL contains "shop", including unpublished ones
//! locmap enumerate --snapshot site.toml --filter shop --force --format ndjson
//!
//! # Localize a single path
//! locmap localize --default en_US --lang es_MX /about
//!
//! # Show the effective configuration
//! locmap config
//! ```
//!
//! ## Output Formats
//!
//! - **text**: One URL per line, with priority and last modification date
//! - **json**: A single JSON array
//! - **ndjson**: One JSON object per line, written as entries are produced
//!
//! When stdout is not a terminal and no format is given, JSON is used.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::cli_args::FormatArg;

/// Main CLI structure for the `locmap` command
#[derive(Parser, Clone, Debug)]
#[command(name = "locmap")]
#[command(version)]
#[command(about = "locmap - Localized sitemap URL enumeration", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to configuration file. Also via `LOCMAP_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = "LOCMAP_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands for the `locmap` CLI
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// List the sitemap URLs of a site snapshot
    Enumerate {
        /// Site snapshot to read (`.json` or `.toml`)
        #[arg(short = 's', long, value_name = "FILE")]
        snapshot: PathBuf,

        /// Only include pages whose URL contains this text
        #[arg(long, value_name = "TEXT")]
        filter: Option<String>,

        /// Include unpublished, unindexed and scheduled pages
        #[arg(long)]
        force: bool,

        /// Output format
        #[command(flatten)]
        format: FormatArg,
    },

    /// Print the path a language serves a URL under
    Localize {
        /// Code of the website's default language
        #[arg(long = "default", value_name = "CODE")]
        default_lang: String,

        /// Code of the language to localize for
        #[arg(long = "lang", value_name = "CODE")]
        lang: String,

        /// Site path to localize (e.g. `/about`)
        path: String,
    },

    /// Show the effective configuration
    Config {
        /// Print the configuration file path instead
        #[arg(long)]
        path: bool,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_enumerate_arguments() {
        let cli = Cli::try_parse_from([
            "locmap",
            "enumerate",
            "--snapshot",
            "site.json",
            "--filter",
            "shop",
            "--force",
            "--format",
            "ndjson",
        ])
        .unwrap();

        match cli.command {
            Commands::Enumerate {
                snapshot,
                filter,
                force,
                format,
            } => {
                assert_eq!(snapshot, PathBuf::from("site.json"));
                assert_eq!(filter.as_deref(), Some("shop"));
                assert!(force);
                assert_eq!(format.format, Some(OutputFormat::Ndjson));
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["locmap", "config", "--path", "-q", "--no-color"]).unwrap();
        assert!(cli.quiet);
        assert!(cli.no_color);
        assert!(matches!(cli.command, Commands::Config { path: true }));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["locmap", "-v", "-q", "config"]).is_err());
    }

    #[test]
    fn test_localize_requires_both_languages() {
        assert!(Cli::try_parse_from(["locmap", "localize", "--lang", "es_MX", "/a"]).is_err());
        let cli = Cli::try_parse_from([
            "locmap",
            "localize",
            "--default",
            "en_US",
            "--lang",
            "es_MX",
            "/about",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Localize { ref path, .. } if path == "/about"));
    }
}
