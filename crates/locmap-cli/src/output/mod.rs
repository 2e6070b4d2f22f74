//! # Output Formatting
//!
//! Rendering of sitemap entries for the `locmap` CLI.
//!
//! ## Supported Formats
//!
//! - **Text**: One location per line, with priority and last modification
//!   date when present
//! - **JSON**: Single JSON array for programmatic consumption
//! - **NDJSON**: Newline-delimited JSON, written as entries are produced
//!
//! JSON format:
//! ```json
//! [
//!   {"loc": "/about", "priority": 0.8, "lastmod": "2024-03-05"},
//!   {"loc": "/es/about", "priority": 0.8, "lastmod": "2024-03-05"}
//! ]
//! ```

mod formatter;
mod json;
mod text;

pub use formatter::{EntryFormatter, OutputFormat};
