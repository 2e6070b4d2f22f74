//! Callbacks for what an enumeration emits and skips.
//!
//! A blog post whose URL cannot be computed in one language is skipped for
//! that language only. The observer is where those skips become visible:
//! [`TracingObserver`] logs them, [`SkipLog`] also keeps them for later
//! inspection.

use crate::types::{BlogPost, Language, RecordId, SitemapEntry};
use crate::Error;
use std::cell::RefCell;

/// Receives enumeration events. Every method defaults to doing nothing.
pub trait EnumerationObserver {
    /// An entry passed deduplication and is about to be yielded.
    fn entry_emitted(&self, _entry: &SitemapEntry) {}

    /// `post` has no URL in `lang`.
    fn post_url_missing(&self, _post: &BlogPost, _lang: &Language) {}

    /// Computing the URL of `post` in `lang` failed.
    fn post_url_failed(&self, _post: &BlogPost, _lang: &Language, _error: &Error) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EnumerationObserver for NoopObserver {}

/// Observer that logs every event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl EnumerationObserver for TracingObserver {
    fn entry_emitted(&self, entry: &SitemapEntry) {
        tracing::debug!(loc = %entry.loc, "Yielding URL");
    }

    fn post_url_missing(&self, post: &BlogPost, lang: &Language) {
        tracing::warn!(post_id = post.id, lang = %lang.code, "No website URL for blog post");
    }

    fn post_url_failed(&self, post: &BlogPost, lang: &Language, error: &Error) {
        tracing::warn!(
            post_id = post.id,
            lang = %lang.code,
            category = error.category(),
            error = %error,
            "Error generating URL for blog post"
        );
    }
}

/// Why a blog post was left out for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The post has no URL in that language.
    MissingUrl,
    /// URL computation failed with this message.
    Failed(String),
}

/// A blog post left out of the sitemap for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPost {
    /// The post.
    pub post_id: RecordId,
    /// The language it was skipped for.
    pub lang_code: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Observer that logs like [`TracingObserver`] and records every skip.
#[derive(Debug, Default)]
pub struct SkipLog {
    skipped: RefCell<Vec<SkippedPost>>,
}

impl SkipLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skips recorded so far, in the order they happened.
    pub fn skipped(&self) -> Vec<SkippedPost> {
        self.skipped.borrow().clone()
    }

    /// Number of skips recorded so far.
    pub fn len(&self) -> usize {
        self.skipped.borrow().len()
    }

    /// Whether nothing was skipped.
    pub fn is_empty(&self) -> bool {
        self.skipped.borrow().is_empty()
    }

    fn record(&self, post: &BlogPost, lang: &Language, reason: SkipReason) {
        self.skipped.borrow_mut().push(SkippedPost {
            post_id: post.id,
            lang_code: lang.code.clone(),
            reason,
        });
    }
}

impl EnumerationObserver for SkipLog {
    fn entry_emitted(&self, entry: &SitemapEntry) {
        TracingObserver.entry_emitted(entry);
    }

    fn post_url_missing(&self, post: &BlogPost, lang: &Language) {
        TracingObserver.post_url_missing(post, lang);
        self.record(post, lang, SkipReason::MissingUrl);
    }

    fn post_url_failed(&self, post: &BlogPost, lang: &Language, error: &Error) {
        TracingObserver.post_url_failed(post, lang, error);
        self.record(post, lang, SkipReason::Failed(error.to_string()));
    }
}
