//! # Output Formatting Abstractions
//!
//! [`OutputFormat`] names the available formats; [`EntryFormatter`] receives
//! entries one at a time and dispatches to the text or JSON implementation.
//! Text and NDJSON are written as entries arrive, JSON is buffered until
//! [`EntryFormatter::finish`].

use anyhow::Result;
use locmap_core::{EnumerationStats, SitemapEntry};
use std::io::Write;

use super::{json::JsonFormatter, text::TextFormatter};

/// Output format options supported by the CLI
///
/// - **Text**: Human-readable, one location per line
/// - **Json**: Single pretty-printed JSON array
/// - **Ndjson**: Newline-delimited JSON, one entry per line
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty text output (default)
    Text,
    /// Single JSON array
    Json,
    /// Newline-delimited JSON
    Ndjson,
}

/// Writes sitemap entries in one [`OutputFormat`]
pub struct EntryFormatter {
    format: OutputFormat,
    buffered: Vec<SitemapEntry>,
}

impl EntryFormatter {
    pub const fn new(format: OutputFormat) -> Self {
        Self {
            format,
            buffered: Vec::new(),
        }
    }

    /// Write (or buffer) one entry
    pub fn write(&mut self, out: &mut impl Write, entry: SitemapEntry) -> Result<()> {
        match self.format {
            OutputFormat::Text => TextFormatter::write_entry(out, &entry),
            OutputFormat::Ndjson => JsonFormatter::write_entry_ndjson(out, &entry),
            OutputFormat::Json => {
                self.buffered.push(entry);
                Ok(())
            },
        }
    }

    /// Flush buffered output; text output also gets a summary on `diag`
    /// unless `quiet` is set.
    pub fn finish(
        self,
        out: &mut impl Write,
        diag: &mut impl Write,
        stats: &EnumerationStats,
        quiet: bool,
    ) -> Result<()> {
        match self.format {
            OutputFormat::Json => JsonFormatter::write_entries(out, &self.buffered)?,
            OutputFormat::Text if !quiet => {
                out.flush()?;
                writeln!(diag, "{}", TextFormatter::summary(stats))?;
                diag.flush()?;
            },
            OutputFormat::Text | OutputFormat::Ndjson => {},
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    fn about() -> SitemapEntry {
        serde_json::from_str(r#"{"loc": "/about", "priority": 0.8, "lastmod": "2024-03-05"}"#)
            .unwrap()
    }

    fn render(format: OutputFormat, entries: Vec<SitemapEntry>) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        let mut formatter = EntryFormatter::new(format);
        for entry in entries {
            formatter.write(&mut out, entry).unwrap();
        }
        formatter
            .finish(&mut out, &mut io::sink(), &EnumerationStats::default(), true)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_output() {
        let text = render(
            OutputFormat::Text,
            vec![about(), SitemapEntry::new("/es/blog/x")],
        );
        assert_eq!(
            text,
            "/about  priority 0.8  lastmod 2024-03-05\n/es/blog/x\n"
        );
    }

    #[test]
    fn test_ndjson_output_omits_absent_fields() {
        let text = render(
            OutputFormat::Ndjson,
            vec![about(), SitemapEntry::new("/es/blog/x")],
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                r#"{"loc":"/about","priority":0.8,"lastmod":"2024-03-05"}"#,
                r#"{"loc":"/es/blog/x"}"#,
            ]
        );
    }

    #[test]
    fn test_json_output_is_one_array() {
        let text = render(OutputFormat::Json, vec![SitemapEntry::new("/a")]);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, serde_json::json!([{"loc": "/a"}]));

        let empty = render(OutputFormat::Json, Vec::new());
        assert_eq!(empty.trim(), "[]");
    }

    #[test]
    fn test_summary() {
        let stats = EnumerationStats {
            pages_scanned: 2,
            posts_scanned: 1,
            emitted: 7,
            duplicates: 2,
            skipped_post_urls: 0,
        };
        assert_eq!(
            TextFormatter::summary(&stats),
            "7 URLs from 2 pages and 1 blog post, 2 duplicates suppressed"
        );
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_text_summary_goes_to_diag_writer() {
        let stats = EnumerationStats {
            emitted: 1,
            pages_scanned: 1,
            ..EnumerationStats::default()
        };
        let mut out = Vec::new();
        let mut diag = Vec::new();
        EntryFormatter::new(OutputFormat::Text)
            .finish(&mut out, &mut diag, &stats, false)
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(
            String::from_utf8(diag).unwrap(),
            format!("{}\n", TextFormatter::summary(&stats))
        );

        let mut quiet_diag = Vec::new();
        EntryFormatter::new(OutputFormat::Text)
            .finish(&mut out, &mut quiet_diag, &stats, true)
            .unwrap();
        assert!(quiet_diag.is_empty());
    }

    #[test]
    fn test_summary_write_error_is_reported() {
        let err = EntryFormatter::new(OutputFormat::Text)
            .finish(
                &mut Vec::new(),
                &mut ClosedPipe,
                &EnumerationStats::default(),
                false,
            )
            .unwrap_err();
        let io_err = err.downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
    }
}
