//! Config command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use locmap_core::Config;
use std::path::Path;

/// Print the effective configuration as TOML, preceded by where it came from
pub fn execute(config: &Config, config_path: &Path) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    let origin = if config_path.exists() {
        config_path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", config_path.display())
    };
    println!("{}", format!("# {origin}").dimmed());
    print!("{rendered}");
    Ok(())
}

/// Print the configuration file path
pub fn print_path(config_path: &Path) {
    println!("{}", config_path.display());
}
