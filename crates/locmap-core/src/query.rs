//! Filter expressions passed to record repositories.
//!
//! Repositories backed by a database translate these into their own query
//! language; in-memory repositories call `matches` directly. Either way the
//! selected records must be exactly those `matches` accepts.

use crate::types::{BlogPost, Page, RecordId};
use chrono::{DateTime, Utc};

/// Selection of pages for one enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Website whose pages (plus shared pages) are selected.
    pub website_id: RecordId,
    /// When set, only indexed, published pages whose publication date is
    /// empty or not after this instant are selected.
    pub visible_at: Option<DateTime<Utc>>,
    /// Case-sensitive substring the page URL must contain.
    pub url_contains: Option<String>,
}

impl PageQuery {
    /// Query for every non-root page of `website_id`.
    pub const fn new(website_id: RecordId) -> Self {
        Self {
            website_id,
            visible_at: None,
            url_contains: None,
        }
    }

    /// Restrict to pages visible at `now`.
    #[must_use]
    pub fn visible_at(mut self, now: DateTime<Utc>) -> Self {
        self.visible_at = Some(now);
        self
    }

    /// Restrict to URLs containing `needle`. An empty needle is ignored.
    #[must_use]
    pub fn url_contains(mut self, needle: Option<&str>) -> Self {
        self.url_contains = needle.filter(|n| !n.is_empty()).map(str::to_string);
        self
    }

    /// Whether `page` is selected by this query.
    ///
    /// The site root (`/`) is never selected.
    pub fn matches(&self, page: &Page) -> bool {
        if page.url == "/" {
            return false;
        }
        if page.website_id.is_some_and(|id| id != self.website_id) {
            return false;
        }
        if let Some(now) = self.visible_at {
            let visible = page.website_indexed
                && page.website_published
                && page.date_publish.is_none_or(|at| at <= now);
            if !visible {
                return false;
            }
        }
        self.url_contains
            .as_deref()
            .is_none_or(|needle| page.url.contains(needle))
    }
}

/// Selection of blog posts for one enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPostQuery {
    /// Website whose posts (plus shared posts) are selected.
    pub website_id: RecordId,
    /// Posts dated after this instant are not selected.
    pub published_at: DateTime<Utc>,
}

impl BlogPostQuery {
    /// Query for the published posts of `website_id` at `now`.
    pub const fn new(website_id: RecordId, now: DateTime<Utc>) -> Self {
        Self {
            website_id,
            published_at: now,
        }
    }

    /// Whether `post` is selected by this query.
    pub fn matches(&self, post: &BlogPost) -> bool {
        post.website_published
            && post.website_id.is_none_or(|id| id == self.website_id)
            && post.post_date.is_none_or(|at| at <= self.published_at)
    }
}
