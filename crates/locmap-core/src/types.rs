//! Core data types: the records read from a site's store and the sitemap
//! entries produced from them.
//!
//! Records are read-only views. Timestamps are UTC and optional; fields that
//! a store writes as `false`, `null` or an unparseable string deserialize to
//! `None` (see [`crate::timestamp`]).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a record in the site's store.
pub type RecordId = u64;

/// Priority a page view carries when nobody has changed it.
pub const DEFAULT_VIEW_PRIORITY: i32 = 16;

const fn default_true() -> bool {
    true
}

const fn default_view_priority() -> i32 {
    DEFAULT_VIEW_PRIORITY
}

/// A language installed on the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Record id.
    pub id: RecordId,
    /// Locale code such as `en_US` or `es_MX`.
    pub code: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Whether the language is enabled.
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Language {
    /// Create an active language with an empty display name.
    pub fn new(id: RecordId, code: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            name: String::new(),
            active: true,
        }
    }
}

/// A website served by the site's store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    /// Record id.
    pub id: RecordId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Public origin, e.g. `https://www.example.com`.
    #[serde(default)]
    pub domain: Option<String>,
    /// Language whose URLs carry no prefix.
    #[serde(default)]
    pub default_lang_id: Option<RecordId>,
    /// Languages offered on this website, in display order.
    #[serde(default)]
    pub language_ids: Vec<RecordId>,
}

impl Website {
    /// The configured domain, if it is non-empty.
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref().filter(|d| !d.is_empty())
    }
}

/// The view record rendering a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    /// View priority; [`DEFAULT_VIEW_PRIORITY`] unless customized.
    #[serde(default = "default_view_priority")]
    pub priority: i32,
    /// Last modification of the view.
    #[serde(default, deserialize_with = "crate::timestamp::lenient")]
    pub write_date: Option<DateTime<Utc>>,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            priority: DEFAULT_VIEW_PRIORITY,
            write_date: None,
        }
    }
}

/// A website page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Record id.
    pub id: RecordId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Path of the page, e.g. `/about`.
    pub url: String,
    /// Owning website; `None` means the page is shared by all websites.
    #[serde(default)]
    pub website_id: Option<RecordId>,
    /// Whether search engines may index the page.
    #[serde(default = "default_true")]
    pub website_indexed: bool,
    /// Whether the page is visible to visitors.
    #[serde(default)]
    pub website_published: bool,
    /// Scheduled publication time.
    #[serde(default, deserialize_with = "crate::timestamp::lenient")]
    pub date_publish: Option<DateTime<Utc>>,
    /// Last modification of the page record.
    #[serde(default, deserialize_with = "crate::timestamp::lenient")]
    pub write_date: Option<DateTime<Utc>>,
    /// The view rendering this page.
    #[serde(default)]
    pub view: Option<PageView>,
}

impl Page {
    /// Create an unpublished, indexed page with the given path.
    pub fn new(id: RecordId, url: impl Into<String>) -> Self {
        Self {
            id,
            name: String::new(),
            url: url.into(),
            website_id: None,
            website_indexed: true,
            website_published: false,
            date_publish: None,
            write_date: None,
            view: None,
        }
    }

    /// The later of the page's and its view's modification time.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        let view_date = self.view.as_ref().and_then(|v| v.write_date);
        self.write_date.max(view_date)
    }
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    /// Record id.
    pub id: RecordId,
    /// Title.
    #[serde(default)]
    pub name: String,
    /// Whether the post is visible to visitors.
    #[serde(default)]
    pub website_published: bool,
    /// Owning website; `None` means the post is shared by all websites.
    #[serde(default)]
    pub website_id: Option<RecordId>,
    /// Publication time.
    #[serde(default, deserialize_with = "crate::timestamp::lenient")]
    pub post_date: Option<DateTime<Utc>>,
    /// URL in the default language.
    #[serde(default)]
    pub url: Option<String>,
    /// URLs computed for specific languages, keyed by language code.
    #[serde(default)]
    pub translated_urls: BTreeMap<String, String>,
}

impl BlogPost {
    /// Create an unpublished post with a default-language URL.
    pub fn new(id: RecordId, url: impl Into<String>) -> Self {
        Self {
            id,
            name: String::new(),
            website_published: false,
            website_id: None,
            post_date: None,
            url: Some(url.into()),
            translated_urls: BTreeMap::new(),
        }
    }
}

/// A single URL of the sitemap.
///
/// `priority` and `lastmod` are only present for pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapEntry {
    /// Location path, unique within one enumeration.
    pub loc: String,
    /// Relative priority in `[0.0, 1.0]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,
    /// Date of last modification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<NaiveDate>,
}

impl SitemapEntry {
    /// Create an entry with only a location.
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            priority: None,
            lastmod: None,
        }
    }

    /// Attach a priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Option<f32>) -> Self {
        self.priority = priority;
        self
    }

    /// Attach a last modification date.
    #[must_use]
    pub fn with_lastmod(mut self, lastmod: Option<NaiveDate>) -> Self {
        self.lastmod = lastmod;
        self
    }
}
