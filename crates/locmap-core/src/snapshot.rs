//! In-memory site store loaded from a JSON or TOML export.
//!
//! A [`SiteSnapshot`] implements every repository trait, so it can drive an
//! enumeration from the command line or stand in for a real store in tests.
//!
//! ## Format
//!
//! ```json
//! {
//!   "current_website_id": 1,
//!   "websites": [
//!     {"id": 1, "domain": "https://example.com", "default_lang_id": 1, "language_ids": [1, 2]}
//!   ],
//!   "languages": [{"id": 1, "code": "en_US"}, {"id": 2, "code": "es_MX"}],
//!   "pages": [
//!     {"id": 1, "url": "/about", "website_published": true,
//!      "write_date": "2024-01-15 10:00:00", "view": {"priority": 24}}
//!   ],
//!   "blog_posts": [
//!     {"id": 7, "website_published": true, "url": "https://example.com/blog/news/hello-7",
//!      "translated_urls": {"es_MX": "/blog/noticias/hola-7"}}
//!   ]
//! }
//! ```

use crate::query::{BlogPostQuery, PageQuery};
use crate::repository::{
    BlogPostRepository, BlogUrlResolver, LanguageRepository, PageRepository, WebsiteResolver,
};
use crate::types::{BlogPost, Language, Page, RecordId, Website};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::instrument;

/// Every record of a site, held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSnapshot {
    /// Website requests are served for; the first website when unset.
    #[serde(default)]
    pub current_website_id: Option<RecordId>,
    /// Websites.
    #[serde(default)]
    pub websites: Vec<Website>,
    /// Installed languages.
    #[serde(default)]
    pub languages: Vec<Language>,
    /// Pages, in store order.
    #[serde(default)]
    pub pages: Vec<Page>,
    /// Blog posts, in store order.
    #[serde(default)]
    pub blog_posts: Vec<BlogPost>,
}

impl SiteSnapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a snapshot from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a snapshot file; the format follows the extension (`.json` or
    /// `.toml`).
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let snapshot = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&content)?,
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&content)?,
            _ => {
                return Err(Error::Parse(format!(
                    "Unsupported snapshot format: {} (expected .json or .toml)",
                    path.display()
                )));
            },
        };
        tracing::debug!(
            websites = snapshot.websites.len(),
            pages = snapshot.pages.len(),
            blog_posts = snapshot.blog_posts.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }
}

impl WebsiteResolver for SiteSnapshot {
    fn current_website(&self) -> Result<Website> {
        let website = match self.current_website_id {
            Some(id) => self.websites.iter().find(|w| w.id == id),
            None => self.websites.first(),
        };
        website.cloned().ok_or_else(|| {
            Error::NotFound(self.current_website_id.map_or_else(
                || "snapshot has no websites".to_string(),
                |id| format!("website {id}"),
            ))
        })
    }
}

impl LanguageRepository for SiteSnapshot {
    fn active_languages(&self, website: &Website) -> Result<Vec<Language>> {
        Ok(website
            .language_ids
            .iter()
            .filter_map(|id| self.languages.iter().find(|lang| lang.id == *id))
            .filter(|lang| lang.active)
            .cloned()
            .collect())
    }

    fn language(&self, id: RecordId) -> Result<Option<Language>> {
        Ok(self.languages.iter().find(|lang| lang.id == id).cloned())
    }
}

impl PageRepository for SiteSnapshot {
    fn search_pages(&self, query: &PageQuery) -> Result<Vec<Page>> {
        Ok(self
            .pages
            .iter()
            .filter(|page| query.matches(page))
            .cloned()
            .collect())
    }
}

impl BlogPostRepository for SiteSnapshot {
    fn search_posts(&self, query: &BlogPostQuery) -> Result<Vec<BlogPost>> {
        Ok(self
            .blog_posts
            .iter()
            .filter(|post| query.matches(post))
            .cloned()
            .collect())
    }
}

impl BlogUrlResolver for SiteSnapshot {
    /// The translated URL for `lang`, else the post's base URL.
    ///
    /// Fails with [`Error::InvalidUrl`] when the URL is neither a site path
    /// nor an absolute URL.
    fn localized_url(
        &self,
        post: &BlogPost,
        lang: &Language,
        _website: &Website,
    ) -> Result<Option<String>> {
        let Some(candidate) = post
            .translated_urls
            .get(&lang.code)
            .or(post.url.as_ref())
            .filter(|url| !url.is_empty())
        else {
            return Ok(None);
        };

        if !candidate.starts_with('/') {
            url::Url::parse(candidate).map_err(|e| {
                Error::InvalidUrl(format!("post {} ({}): '{candidate}': {e}", post.id, lang.code))
            })?;
        }
        Ok(Some(candidate.clone()))
    }
}
