//! Error types and handling for locmap-core operations.
//!
//! This module provides a single error type covering every failure the
//! enumerator and its collaborators can surface. Errors are categorized for
//! logging and carry a recoverability hint for callers that retry.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: Reading snapshots and configuration files
//! - **Parse Errors**: Malformed snapshot or timestamp content
//! - **Configuration Errors**: Invalid settings or config files
//! - **Lookup Errors**: Missing websites or languages
//! - **URL Errors**: Blog post URLs that cannot be interpreted
//! - **Repository Errors**: Failures reported by a record store
//!
//! ## Which errors reach the caller
//!
//! Only URL resolution for a single blog post in a single language is
//! recovered inside the enumerator. Everything else is handed back to the
//! consumer of the entry sequence unchanged:
//!
//! ```rust
//! use locmap_core::{Error, Result};
//!
//! fn handle(result: Result<()>) {
//!     match result {
//!         Err(e) if e.is_recoverable() => eprintln!("temporary failure: {e}"),
//!         Err(e) => eprintln!("[{}] {e}", e.category()),
//!         Ok(()) => {},
//!     }
//! }
//!
//! handle(Err(Error::NotFound("website 7".to_string())));
//! ```

use thiserror::Error;

/// The main error type for locmap-core operations.
///
/// All fallible public functions in locmap-core return `Result<T, Error>`.
/// `Display` gives a user-facing message; `Debug` keeps the full source chain.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading snapshot files and configuration. The underlying
    /// `std::io::Error` is preserved.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing operation failed.
    ///
    /// Occurs when snapshot content does not match the expected structure
    /// or a file has an unsupported extension.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration is invalid or inaccessible.
    ///
    /// ## Common Causes
    ///
    /// - Invalid TOML syntax in the config file
    /// - Values outside their valid range (e.g. a non-positive priority scale)
    /// - Config directory cannot be determined or created
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record was not found.
    ///
    /// Used when the current website cannot be resolved or a snapshot
    /// references an id that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// URL is malformed or invalid.
    ///
    /// Raised by URL resolvers for a blog post URL that is neither a site
    /// path nor a parseable absolute URL. The enumerator recovers from this
    /// per post and language.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A record store failed to answer a query.
    ///
    /// Repository implementations backed by a database or remote service
    /// wrap their own failures in this variant.
    #[error("Repository error: {0}")]
    Repository(String),

    /// Serialization or deserialization failed.
    ///
    /// Occurs when converting snapshots or configuration between JSON, TOML
    /// and the in-memory types.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// Only temporary I/O conditions qualify. Lookup, parse and URL errors
    /// describe the data itself and will fail the same way again.
    ///
    /// ```rust
    /// use locmap_core::Error;
    /// use std::io;
    ///
    /// assert!(Error::Io(io::Error::new(io::ErrorKind::TimedOut, "timeout")).is_recoverable());
    /// assert!(!Error::InvalidUrl("::".to_string()).is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Returns one of `"io"`, `"parse"`, `"config"`, `"not_found"`,
    /// `"invalid_url"`, `"repository"`, `"serialization"` or `"other"`.
    /// Used as a structured field when logging.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Repository(_) => "repository",
            Self::Serialization(_) => "serialization",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(
    clippy::panic,
    clippy::disallowed_macros,
    clippy::unwrap_used,
    clippy::unnecessary_wraps
)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io;

    #[test]
    fn test_error_display_formatting() {
        // Given: Different error variants
        let errors = vec![
            (Error::Parse("bad snapshot".to_string()), "Parse error"),
            (Error::Config("missing field".to_string()), "Configuration error"),
            (Error::NotFound("website 3".to_string()), "Not found"),
            (Error::InvalidUrl("::".to_string()), "Invalid URL"),
            (Error::Repository("connection reset".to_string()), "Repository error"),
            (Error::Serialization("eof".to_string()), "Serialization error"),
        ];

        for (error, prefix) in errors {
            // When: Converting to string
            let rendered = error.to_string();

            // Then: Should carry the category prefix
            assert!(rendered.starts_with(prefix), "{rendered}");
        }
    }

    #[test]
    fn test_other_is_displayed_verbatim() {
        assert_eq!(Error::Other("plain".to_string()).to_string(), "plain");
    }

    #[test]
    fn test_io_recoverability_depends_on_kind() {
        let timed_out = Error::Io(io::Error::new(io::ErrorKind::TimedOut, "slow"));
        let interrupted = Error::Io(io::Error::new(io::ErrorKind::Interrupted, "signal"));
        let missing = Error::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));

        assert!(timed_out.is_recoverable());
        assert!(interrupted.is_recoverable());
        assert!(!missing.is_recoverable());
    }

    #[test]
    fn test_categories() {
        assert_eq!(Error::Parse(String::new()).category(), "parse");
        assert_eq!(Error::Config(String::new()).category(), "config");
        assert_eq!(Error::NotFound(String::new()).category(), "not_found");
        assert_eq!(Error::InvalidUrl(String::new()).category(), "invalid_url");
        assert_eq!(Error::Repository(String::new()).category(), "repository");
        assert_eq!(Error::Other(String::new()).category(), "other");
        assert_eq!(
            Error::Io(io::Error::other("x")).category(),
            "io"
        );
    }

    #[test]
    fn test_json_error_converts_to_serialization() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let converted: Error = err.into();
        assert!(matches!(converted, Error::Serialization(_)));
    }

    #[test]
    fn test_toml_error_converts_to_serialization() {
        let err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let converted: Error = err.into();
        assert_eq!(converted.category(), "serialization");
    }

    proptest! {
        #[test]
        fn test_non_io_errors_are_never_recoverable(msg in ".*") {
            let errors = [
                Error::Parse(msg.clone()),
                Error::Config(msg.clone()),
                Error::NotFound(msg.clone()),
                Error::InvalidUrl(msg.clone()),
                Error::Repository(msg.clone()),
                Error::Other(msg),
            ];
            for error in errors {
                prop_assert!(!error.is_recoverable());
            }
        }
    }
}
