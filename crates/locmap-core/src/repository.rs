//! Interfaces onto the site's record store.
//!
//! The enumerator only needs a handful of filtered reads. Each trait covers
//! one kind of record so a store can be swapped for an in-memory fake in
//! tests (see [`crate::snapshot::SiteSnapshot`]).

use crate::query::{BlogPostQuery, PageQuery};
use crate::types::{BlogPost, Language, Page, RecordId, Website};
use crate::Result;
use chrono::{DateTime, Utc};

/// Resolves the website a request is served for.
pub trait WebsiteResolver {
    /// The current website.
    fn current_website(&self) -> Result<Website>;
}

/// Read access to installed languages.
pub trait LanguageRepository {
    /// Active languages offered by `website`, in display order.
    fn active_languages(&self, website: &Website) -> Result<Vec<Language>>;
    /// Look up a language by id.
    fn language(&self, id: RecordId) -> Result<Option<Language>>;
}

/// Read access to website pages.
pub trait PageRepository {
    /// Pages selected by `query`, in store order.
    fn search_pages(&self, query: &PageQuery) -> Result<Vec<Page>>;
}

/// Read access to blog posts.
pub trait BlogPostRepository {
    /// Posts selected by `query`, in store order.
    fn search_posts(&self, query: &BlogPostQuery) -> Result<Vec<BlogPost>>;
}

/// Computes the public URL of a blog post in a given language.
pub trait BlogUrlResolver {
    /// URL of `post` rendered in `lang` on `website`.
    ///
    /// `Ok(None)` means the post has no URL in that language. The URL may be
    /// absolute (prefixed with the website domain) or a site path.
    fn localized_url(
        &self,
        post: &BlogPost,
        lang: &Language,
        website: &Website,
    ) -> Result<Option<String>>;
}

/// Source of the current time.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The collaborators an enumeration reads from.
///
/// All fields are borrowed; one store type usually implements every trait,
/// see [`SiteBackends::from_store`].
#[derive(Clone, Copy)]
pub struct SiteBackends<'a> {
    /// Current website resolution.
    pub websites: &'a dyn WebsiteResolver,
    /// Language lookups.
    pub languages: &'a dyn LanguageRepository,
    /// Page queries.
    pub pages: &'a dyn PageRepository,
    /// Blog post queries.
    pub posts: &'a dyn BlogPostRepository,
    /// Per-language blog post URLs.
    pub urls: &'a dyn BlogUrlResolver,
}

impl<'a> SiteBackends<'a> {
    /// Borrow every collaborator from a single store.
    pub fn from_store<S>(store: &'a S) -> Self
    where
        S: WebsiteResolver
            + LanguageRepository
            + PageRepository
            + BlogPostRepository
            + BlogUrlResolver,
    {
        Self {
            websites: store,
            languages: store,
            pages: store,
            posts: store,
            urls: store,
        }
    }
}

impl std::fmt::Debug for SiteBackends<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteBackends").finish_non_exhaustive()
    }
}
