//! JSON output formatting

use anyhow::Result;
use locmap_core::SitemapEntry;
use std::io::Write;

pub struct JsonFormatter;

impl JsonFormatter {
    /// Write all entries as one pretty-printed JSON array
    pub fn write_entries(out: &mut impl Write, entries: &[SitemapEntry]) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, entries)?;
        writeln!(out)?;
        Ok(())
    }

    /// Write a single entry as one NDJSON line
    pub fn write_entry_ndjson(out: &mut impl Write, entry: &SitemapEntry) -> Result<()> {
        serde_json::to_writer(&mut *out, entry)?;
        writeln!(out)?;
        Ok(())
    }
}
