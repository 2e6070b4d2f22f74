//! # locmap-core
//!
//! Core functionality for locmap - localized URL enumeration for website
//! sitemaps.
//!
//! For a multilingual website, this crate produces the set of public
//! locations a sitemap should list: every visible page and every published
//! blog post, once per active language, under that language's path prefix.
//! Each location is produced at most once per enumeration.
//!
//! ## Architecture
//!
//! - **Enumeration**: [`SitemapEnumerator`] drives a lazy, two-phase
//!   sequence of [`SitemapEntry`] values
//! - **Localization**: [`LocalePrefixer`] maps a language code and a path to
//!   the localized path
//! - **Repositories**: small traits over the site's record store, with an
//!   in-memory [`SiteSnapshot`] implementation loaded from JSON or TOML
//! - **Observation**: [`EnumerationObserver`] sees emitted entries and
//!   skipped blog posts
//! - **Configuration**: fallback language, priority mapping and short
//!   language prefixes
//!
//! ## Quick Start
//!
//! ```rust
//! use locmap_core::{SiteBackends, SiteSnapshot, SitemapEnumerator};
//!
//! let snapshot = SiteSnapshot::from_json_str(r#"{
//!     "websites": [{"id": 1, "default_lang_id": 1, "language_ids": [1, 2]}],
//!     "languages": [{"id": 1, "code": "en_US"}, {"id": 2, "code": "fr_FR"}],
//!     "pages": [
//!         {"id": 1, "url": "/pricing", "website_published": true, "view": {"priority": 32}}
//!     ]
//! }"#)?;
//!
//! let enumerator = SitemapEnumerator::new(SiteBackends::from_store(&snapshot));
//! for entry in enumerator.enumerate(None, false) {
//!     let entry = entry?;
//!     assert_eq!(entry.priority, Some(1.0));
//!     println!("{}", entry.loc);
//! }
//! # Ok::<(), locmap_core::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`]. A failing store query ends an
//! enumeration with a single `Err`; a blog post whose URL cannot be computed
//! is skipped for that language and reported to the observer instead.
//!
//! ```rust
//! use locmap_core::{Error, SiteSnapshot};
//!
//! match SiteSnapshot::from_json_str("{\"pages\": 3}") {
//!     Ok(_) => println!("loaded"),
//!     Err(Error::Serialization(msg)) => eprintln!("bad snapshot: {msg}"),
//!     Err(e) => eprintln!("error: {e}"),
//! }
//! ```

/// Configuration management
pub mod config;
/// The lazy sitemap entry sequence
pub mod enumerator;
/// Error types and result aliases
pub mod error;
/// Per-enumeration deduplication
pub mod ledger;
/// Language path prefixes
pub mod localize;
/// Enumeration event callbacks
pub mod observer;
/// View priority to sitemap priority mapping
pub mod priority;
/// Record filters for page and blog post searches
pub mod query;
/// Store interfaces the enumerator reads from
pub mod repository;
/// In-memory store loaded from a file
pub mod snapshot;
/// Lenient timestamp parsing
pub mod timestamp;
/// Core data types
pub mod types;

// Re-export commonly used types
pub use config::{Config, DefaultsConfig, LocalizationConfig};
pub use enumerator::{
    EnumerationOptions, EnumerationStats, FALLBACK_LANGUAGE, SitemapEntries, SitemapEnumerator,
};
pub use error::{Error, Result};
pub use ledger::UrlLedger;
pub use localize::{LocalePrefixer, ShortPrefix, default_short_prefixes};
pub use observer::{
    EnumerationObserver, NoopObserver, SkipLog, SkipReason, SkippedPost, TracingObserver,
};
pub use priority::PriorityRules;
pub use query::{BlogPostQuery, PageQuery};
pub use repository::{
    BlogPostRepository, BlogUrlResolver, Clock, FixedClock, LanguageRepository, PageRepository,
    SiteBackends, SystemClock, WebsiteResolver,
};
pub use snapshot::SiteSnapshot;
pub use types::*;
