//! Enumerate command implementation

use anyhow::{Context, Result};
use locmap_core::{Config, EnumerationOptions, SiteBackends, SiteSnapshot, SitemapEnumerator};
use std::io;
use std::path::Path;

use crate::output::{EntryFormatter, OutputFormat};

/// Execute the enumerate command
pub fn execute(
    config: &Config,
    snapshot_path: &Path,
    filter: Option<&str>,
    force: bool,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let snapshot = SiteSnapshot::load(snapshot_path)
        .with_context(|| format!("Failed to load snapshot '{}'", snapshot_path.display()))?;

    let enumerator = SitemapEnumerator::new(SiteBackends::from_store(&snapshot))
        .with_options(EnumerationOptions::from(config));
    let mut entries = enumerator.enumerate(filter, force);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut formatter = EntryFormatter::new(format);

    for entry in entries.by_ref() {
        let entry = entry.context("Enumeration failed")?;
        if let Err(e) = formatter.write(&mut out, entry) {
            return ignore_broken_pipe(e);
        }
    }

    let stats = entries.stats();
    tracing::info!(
        emitted = stats.emitted,
        duplicates = stats.duplicates,
        skipped_post_urls = stats.skipped_post_urls,
        "Enumeration finished"
    );
    formatter
        .finish(&mut out, &mut io::stderr().lock(), &stats, quiet)
        .or_else(ignore_broken_pipe)
}

/// A closed stdout (e.g. piped into `head`) ends output without an error.
fn ignore_broken_pipe(error: anyhow::Error) -> Result<()> {
    if is_broken_pipe(&error) {
        Ok(())
    } else {
        Err(error)
    }
}

fn is_broken_pipe(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .map(io::Error::kind)
            .or_else(|| {
                cause
                    .downcast_ref::<serde_json::Error>()
                    .and_then(serde_json::Error::io_error_kind)
            })
            == Some(io::ErrorKind::BrokenPipe)
    })
}
