//! Text output formatting

use anyhow::Result;
use colored::Colorize;
use locmap_core::{EnumerationStats, SitemapEntry};
use std::io::Write;

pub struct TextFormatter;

impl TextFormatter {
    /// Write one entry as `loc  priority  lastmod`, omitting absent fields
    pub fn write_entry(out: &mut impl Write, entry: &SitemapEntry) -> Result<()> {
        let mut details = Vec::with_capacity(2);
        if let Some(priority) = entry.priority {
            details.push(format!("priority {priority:.1}"));
        }
        if let Some(lastmod) = entry.lastmod {
            details.push(format!("lastmod {lastmod}"));
        }

        if details.is_empty() {
            writeln!(out, "{}", entry.loc)?;
        } else {
            writeln!(out, "{}  {}", entry.loc, details.join("  ").dimmed())?;
        }
        Ok(())
    }

    /// One-line summary of an enumeration
    pub fn summary(stats: &EnumerationStats) -> String {
        let mut summary = format!(
            "{} from {} and {}",
            plural(stats.emitted, "URL"),
            plural(stats.pages_scanned, "page"),
            plural(stats.posts_scanned, "blog post"),
        );
        if stats.duplicates > 0 {
            summary.push_str(&format!(", {} duplicates suppressed", stats.duplicates));
        }
        if stats.skipped_post_urls > 0 {
            summary.push_str(&format!(
                ", {} skipped",
                plural(stats.skipped_post_urls, "blog post URL")
            ));
        }
        summary
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
