//! Lazy enumeration of localized sitemap entries.
//!
//! An enumeration runs in two phases that share one [`UrlLedger`]:
//!
//! 1. **Pages**: every non-root page selected by a [`PageQuery`], once per
//!    active language, with priority and last modification date.
//! 2. **Blog posts**: every published post of the website (or of no
//!    website), once per active language, using the URL the
//!    [`BlogUrlResolver`] computes for that language.
//!
//! Nothing is queried until the sequence is first advanced. Blog posts are
//! only queried once the pages are exhausted, so a consumer that stops early
//! never pays for them.
//!
//! ```rust
//! use locmap_core::{SiteBackends, SiteSnapshot, SitemapEnumerator};
//!
//! let snapshot = SiteSnapshot::from_json_str(r#"{
//!     "websites": [{"id": 1, "default_lang_id": 1, "language_ids": [1, 2]}],
//!     "languages": [{"id": 1, "code": "en_US"}, {"id": 2, "code": "es_MX"}],
//!     "pages": [{"id": 1, "url": "/about", "website_published": true}]
//! }"#)?;
//!
//! let enumerator = SitemapEnumerator::new(SiteBackends::from_store(&snapshot));
//! let locs: Vec<String> = enumerator
//!     .enumerate(None, false)
//!     .map(|entry| entry.map(|e| e.loc))
//!     .collect::<locmap_core::Result<_>>()?;
//!
//! assert_eq!(locs, ["/about", "/es/about"]);
//! # Ok::<(), locmap_core::Error>(())
//! ```

use crate::config::Config;
use crate::ledger::UrlLedger;
use crate::localize::{LocalePrefixer, ShortPrefix, default_short_prefixes};
use crate::observer::{EnumerationObserver, TracingObserver};
use crate::priority::PriorityRules;
use crate::query::{BlogPostQuery, PageQuery};
use crate::repository::{BlogUrlResolver, Clock, SiteBackends, SystemClock};
use crate::types::{BlogPost, Language, Page, SitemapEntry, Website};
use crate::Result;
use std::collections::VecDeque;
use std::iter::FusedIterator;
use tracing::Span;

/// Language code assumed when the website has no default language.
pub const FALLBACK_LANGUAGE: &str = "en_US";

/// Tunables of an enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumerationOptions {
    /// Default language code when the website has none.
    pub fallback_language: String,
    /// Short path segments for language code families.
    pub short_prefixes: Vec<ShortPrefix>,
    /// Mapping of view priorities onto sitemap priorities.
    pub priority: PriorityRules,
}

impl Default for EnumerationOptions {
    fn default() -> Self {
        Self {
            fallback_language: FALLBACK_LANGUAGE.to_string(),
            short_prefixes: default_short_prefixes(),
            priority: PriorityRules::default(),
        }
    }
}

impl From<&Config> for EnumerationOptions {
    fn from(config: &Config) -> Self {
        Self {
            fallback_language: config.defaults.fallback_language.clone(),
            short_prefixes: config.localization.short_prefixes.clone(),
            priority: PriorityRules {
                default_priority: config.defaults.default_view_priority,
                scale: config.defaults.priority_scale,
            },
        }
    }
}

/// Running counts of one enumeration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnumerationStats {
    /// Pages taken from the page query so far.
    pub pages_scanned: usize,
    /// Blog posts taken from the post query so far.
    pub posts_scanned: usize,
    /// Entries yielded.
    pub emitted: usize,
    /// Candidate locations dropped because they were already yielded.
    pub duplicates: usize,
    /// Post/language pairs left out because no URL could be computed.
    pub skipped_post_urls: usize,
}

/// Produces sitemap entries for the current website.
pub struct SitemapEnumerator<'a> {
    backends: SiteBackends<'a>,
    clock: &'a dyn Clock,
    observer: &'a dyn EnumerationObserver,
    options: EnumerationOptions,
}

impl std::fmt::Debug for SitemapEnumerator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SitemapEnumerator")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<'a> SitemapEnumerator<'a> {
    /// Create an enumerator using the wall clock, logging observer and
    /// default options.
    pub fn new(backends: SiteBackends<'a>) -> Self {
        Self {
            backends,
            clock: &SystemClock,
            observer: &TracingObserver,
            options: EnumerationOptions::default(),
        }
    }

    /// Use `clock` as the source of "now".
    #[must_use]
    pub fn with_clock(mut self, clock: &'a dyn Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Report emitted entries and skipped posts to `observer`.
    #[must_use]
    pub fn with_observer(mut self, observer: &'a dyn EnumerationObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Replace the options.
    #[must_use]
    pub fn with_options(mut self, options: EnumerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Start an enumeration.
    ///
    /// `query` restricts pages to URLs containing it (blog posts are not
    /// filtered). `force` includes pages that are unpublished, unindexed or
    /// scheduled for later.
    ///
    /// The returned sequence yields each location at most once. A failing
    /// query is yielded as a single `Err`, after which the sequence ends.
    pub fn enumerate(&self, query: Option<&str>, force: bool) -> SitemapEntries<'a> {
        SitemapEntries {
            backends: self.backends,
            clock: self.clock,
            observer: self.observer,
            options: self.options.clone(),
            query: query.filter(|q| !q.is_empty()).map(str::to_string),
            force,
            span: tracing::info_span!("enumerate", query = ?query, force),
            phase: Phase::Start,
            site: None,
            pending: VecDeque::new(),
            ledger: UrlLedger::new(),
            stats: EnumerationStats::default(),
        }
    }
}

/// Website-wide state resolved when the enumeration starts.
#[derive(Debug)]
struct SiteContext {
    website: Website,
    languages: Vec<Language>,
    prefixer: LocalePrefixer,
}

#[derive(Debug)]
enum Phase {
    Start,
    Pages(std::vec::IntoIter<Page>),
    Posts(std::vec::IntoIter<BlogPost>),
    Done,
}

/// The entry sequence of one enumeration.
///
/// Not restartable: call [`SitemapEnumerator::enumerate`] again for a fresh
/// sequence.
pub struct SitemapEntries<'a> {
    backends: SiteBackends<'a>,
    clock: &'a dyn Clock,
    observer: &'a dyn EnumerationObserver,
    options: EnumerationOptions,
    query: Option<String>,
    force: bool,
    span: Span,
    phase: Phase,
    site: Option<SiteContext>,
    pending: VecDeque<SitemapEntry>,
    ledger: UrlLedger,
    stats: EnumerationStats,
}

impl std::fmt::Debug for SitemapEntries<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SitemapEntries")
            .field("query", &self.query)
            .field("force", &self.force)
            .field("phase", &self.phase)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl SitemapEntries<'_> {
    /// Counts accumulated so far.
    pub const fn stats(&self) -> EnumerationStats {
        self.stats
    }

    /// Yield the next queued candidate that passes deduplication.
    fn take_pending(&mut self) -> Option<SitemapEntry> {
        while let Some(entry) = self.pending.pop_front() {
            if self.ledger.admit(&entry.loc) {
                self.stats.emitted += 1;
                self.observer.entry_emitted(&entry);
                return Some(entry);
            }
            if !entry.loc.is_empty() {
                self.stats.duplicates += 1;
            }
        }
        None
    }

    /// Do one unit of work. Returns `false` once there is nothing left.
    fn advance(&mut self) -> Result<bool> {
        match std::mem::replace(&mut self.phase, Phase::Done) {
            Phase::Start => {
                let site = self.resolve_site()?;
                let mut query = PageQuery::new(site.website.id).url_contains(self.query.as_deref());
                if !self.force {
                    query = query.visible_at(self.clock.now());
                }
                let pages = self.backends.pages.search_pages(&query)?;
                tracing::info!(count = pages.len(), "Found pages");
                self.site = Some(site);
                self.phase = Phase::Pages(pages.into_iter());
            },
            Phase::Pages(mut pages) => {
                let Some(site) = self.site.as_ref() else {
                    return Ok(false);
                };
                if let Some(page) = pages.next() {
                    self.stats.pages_scanned += 1;
                    self.pending
                        .extend(page_candidates(site, &self.options.priority, &page));
                    self.phase = Phase::Pages(pages);
                } else {
                    let query = BlogPostQuery::new(site.website.id, self.clock.now());
                    let posts = self.backends.posts.search_posts(&query)?;
                    tracing::info!(count = posts.len(), "Found published blog posts");
                    self.phase = Phase::Posts(posts.into_iter());
                }
            },
            Phase::Posts(mut posts) => {
                let Some(site) = self.site.as_ref() else {
                    return Ok(false);
                };
                let Some(post) = posts.next() else {
                    return Ok(false);
                };
                self.stats.posts_scanned += 1;
                let resolved = post_candidates(site, self.backends.urls, self.observer, &post);
                self.stats.skipped_post_urls += resolved.skipped;
                self.pending.extend(resolved.entries);
                self.phase = Phase::Posts(posts);
            },
            Phase::Done => return Ok(false),
        }
        Ok(true)
    }

    fn resolve_site(&self) -> Result<SiteContext> {
        let website = self.backends.websites.current_website()?;
        let languages = self.backends.languages.active_languages(&website)?;
        let default_code = match website.default_lang_id {
            Some(id) => self.backends.languages.language(id)?.map(|lang| lang.code),
            None => None,
        }
        .unwrap_or_else(|| self.options.fallback_language.clone());

        tracing::info!(
            website_id = website.id,
            default_lang = %default_code,
            languages = languages.len(),
            "Resolved current website"
        );

        Ok(SiteContext {
            prefixer: LocalePrefixer::with_short_prefixes(
                default_code,
                self.options.short_prefixes.clone(),
            ),
            website,
            languages,
        })
    }
}

impl Iterator for SitemapEntries<'_> {
    type Item = Result<SitemapEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let span = self.span.clone();
        let _entered = span.enter();
        loop {
            if let Some(entry) = self.take_pending() {
                return Some(Ok(entry));
            }
            match self.advance() {
                Ok(true) => {},
                Ok(false) => return None,
                Err(e) => {
                    tracing::error!(category = e.category(), error = %e, "Enumeration aborted");
                    self.phase = Phase::Done;
                    self.pending.clear();
                    return Some(Err(e));
                },
            }
        }
    }
}

impl FusedIterator for SitemapEntries<'_> {}

/// One candidate per language for `page`, before deduplication.
fn page_candidates(
    site: &SiteContext,
    rules: &PriorityRules,
    page: &Page,
) -> Vec<SitemapEntry> {
    let priority = page
        .view
        .as_ref()
        .and_then(|view| rules.sitemap_priority(view.priority));
    let lastmod = page.last_modified().map(|at| at.date_naive());

    site.languages
        .iter()
        .map(|lang| {
            let loc = site.prefixer.localize(&lang.code, &page.url);
            tracing::debug!(page = %page.name, lang = %lang.code, url = %loc, "Page URL");
            SitemapEntry::new(loc)
                .with_priority(priority)
                .with_lastmod(lastmod)
        })
        .collect()
}

struct PostCandidates {
    entries: Vec<SitemapEntry>,
    skipped: usize,
}

/// One candidate per language for `post`, before deduplication.
///
/// URL failures are reported to `observer` and leave that language out.
fn post_candidates(
    site: &SiteContext,
    urls: &dyn BlogUrlResolver,
    observer: &dyn EnumerationObserver,
    post: &BlogPost,
) -> PostCandidates {
    tracing::debug!(post_id = post.id, title = %post.name, post_date = ?post.post_date, "Processing blog post");

    let mut resolved = PostCandidates {
        entries: Vec::with_capacity(site.languages.len()),
        skipped: 0,
    };
    for lang in &site.languages {
        match urls.localized_url(post, lang, &site.website) {
            Ok(Some(url)) if !url.is_empty() => {
                let path = strip_domain(&url, site.website.domain());
                let loc = site.prefixer.localize(&lang.code, path);
                tracing::debug!(post_id = post.id, lang = %lang.code, url = %loc, "Blog post URL");
                resolved.entries.push(SitemapEntry::new(loc));
            },
            Ok(_) => {
                observer.post_url_missing(post, lang);
                resolved.skipped += 1;
            },
            Err(e) => {
                observer.post_url_failed(post, lang, &e);
                resolved.skipped += 1;
            },
        }
    }
    resolved
}

/// Remove a leading `domain` from `url`.
///
/// Only the prefix is stripped; the domain appearing later in the URL, e.g.
/// inside a query string, is kept.
fn strip_domain<'u>(url: &'u str, domain: Option<&str>) -> &'u str {
    domain
        .and_then(|domain| url.strip_prefix(domain))
        .unwrap_or(url)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::float_cmp,
    clippy::too_many_lines
)]
mod tests {
    use super::*;
    use crate::observer::{SkipLog, SkipReason};
    use crate::repository::{
        BlogPostRepository, FixedClock, LanguageRepository, PageRepository, WebsiteResolver,
    };
    use crate::types::{PageView, RecordId};
    use crate::Error;
    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
    use std::cell::Cell;
    use std::collections::HashSet;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    /// In-memory store with failure injection and query counters.
    struct FakeSite {
        website: Website,
        languages: Vec<Language>,
        pages: Vec<Page>,
        posts: Vec<BlogPost>,
        failing_posts: HashSet<RecordId>,
        fail_page_query: bool,
        page_queries: Cell<usize>,
        post_queries: Cell<usize>,
    }

    impl FakeSite {
        fn new() -> Self {
            Self {
                website: Website {
                    id: 1,
                    name: "Main".to_string(),
                    domain: Some("https://shop.example.com".to_string()),
                    default_lang_id: Some(1),
                    language_ids: vec![1, 2, 3],
                },
                languages: vec![
                    Language::new(1, "en_US"),
                    Language::new(2, "es_MX"),
                    Language::new(3, "fr_FR"),
                ],
                pages: Vec::new(),
                posts: Vec::new(),
                failing_posts: HashSet::new(),
                fail_page_query: false,
                page_queries: Cell::new(0),
                post_queries: Cell::new(0),
            }
        }

        fn with_page(mut self, page: Page) -> Self {
            self.pages.push(page);
            self
        }

        fn with_post(mut self, post: BlogPost) -> Self {
            self.posts.push(post);
            self
        }
    }

    impl WebsiteResolver for FakeSite {
        fn current_website(&self) -> Result<Website> {
            Ok(self.website.clone())
        }
    }

    impl LanguageRepository for FakeSite {
        fn active_languages(&self, website: &Website) -> Result<Vec<Language>> {
            Ok(website
                .language_ids
                .iter()
                .filter_map(|id| self.languages.iter().find(|l| l.id == *id && l.active))
                .cloned()
                .collect())
        }

        fn language(&self, id: RecordId) -> Result<Option<Language>> {
            Ok(self.languages.iter().find(|l| l.id == id).cloned())
        }
    }

    impl PageRepository for FakeSite {
        fn search_pages(&self, query: &PageQuery) -> Result<Vec<Page>> {
            self.page_queries.set(self.page_queries.get() + 1);
            if self.fail_page_query {
                return Err(Error::Repository("connection reset".to_string()));
            }
            Ok(self.pages.iter().filter(|p| query.matches(p)).cloned().collect())
        }
    }

    impl BlogPostRepository for FakeSite {
        fn search_posts(&self, query: &BlogPostQuery) -> Result<Vec<BlogPost>> {
            self.post_queries.set(self.post_queries.get() + 1);
            Ok(self.posts.iter().filter(|p| query.matches(p)).cloned().collect())
        }
    }

    impl BlogUrlResolver for FakeSite {
        fn localized_url(
            &self,
            post: &BlogPost,
            lang: &Language,
            _website: &Website,
        ) -> Result<Option<String>> {
            if self.failing_posts.contains(&post.id) {
                return Err(Error::InvalidUrl(format!("post {}", post.id)));
            }
            Ok(post
                .translated_urls
                .get(&lang.code)
                .cloned()
                .or_else(|| post.url.clone()))
        }
    }

    fn page(id: RecordId, url: &str) -> Page {
        let mut page = Page::new(id, url);
        page.website_published = true;
        page
    }

    fn post(id: RecordId, url: &str) -> BlogPost {
        let mut post = BlogPost::new(id, url);
        post.website_published = true;
        post
    }

    fn collect(site: &FakeSite, query: Option<&str>, force: bool) -> Vec<SitemapEntry> {
        let clock = FixedClock(now());
        SitemapEnumerator::new(SiteBackends::from_store(site))
            .with_clock(&clock)
            .enumerate(query, force)
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    fn locs(entries: &[SitemapEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.loc.as_str()).collect()
    }

    #[test]
    fn test_pages_then_posts_by_record_then_language() {
        let site = FakeSite::new()
            .with_page(page(1, "/about"))
            .with_page(page(2, "/contact"))
            .with_post(post(10, "/blog/news/launch-10"));

        let entries = collect(&site, None, false);

        assert_eq!(
            locs(&entries),
            [
                "/about",
                "/es/about",
                "/fr_FR/about",
                "/contact",
                "/es/contact",
                "/fr_FR/contact",
                "/blog/news/launch-10",
                "/es/blog/news/launch-10",
                "/fr_FR/blog/news/launch-10",
            ]
        );
    }

    #[test]
    fn test_root_page_is_never_emitted() {
        let site = FakeSite::new().with_page(page(1, "/")).with_page(page(2, "/about"));

        let entries = collect(&site, None, true);

        let locs = locs(&entries);
        assert!(!locs.contains(&"/"));
        assert!(!locs.contains(&"/es"));
        assert!(!locs.contains(&"/fr_FR"));
        assert_eq!(locs.len(), 3);
    }

    #[test]
    fn test_duplicates_across_records_and_phases_are_dropped() {
        let site = FakeSite::new()
            .with_page(page(1, "/about"))
            .with_page(page(2, "/about"))
            .with_post(post(10, "/about"))
            .with_post(post(11, "https://shop.example.com/about"));

        let clock = FixedClock(now());
        let enumerator =
            SitemapEnumerator::new(SiteBackends::from_store(&site)).with_clock(&clock);
        let mut entries = enumerator.enumerate(None, false);
        let collected: Vec<SitemapEntry> = entries.by_ref().map(Result::unwrap).collect();

        assert_eq!(locs(&collected), ["/about", "/es/about", "/fr_FR/about"]);
        let stats = entries.stats();
        assert_eq!(stats.emitted, 3);
        assert_eq!(stats.duplicates, 9);
        assert_eq!(stats.pages_scanned, 2);
        assert_eq!(stats.posts_scanned, 2);
    }

    #[test]
    fn test_spanish_variants_collapse_onto_one_prefix() {
        let mut site = FakeSite::new().with_page(page(1, "/about"));
        site.languages.push(Language::new(4, "es_ES"));
        site.website.language_ids.push(4);

        let entries = collect(&site, None, false);

        assert_eq!(locs(&entries), ["/about", "/es/about", "/fr_FR/about"]);
    }

    #[test]
    fn test_priority_only_for_customized_views() {
        let mut custom = page(1, "/custom");
        custom.view = Some(PageView {
            priority: 24,
            write_date: None,
        });
        let mut plain = page(2, "/plain");
        plain.view = Some(PageView::default());
        let viewless = page(3, "/viewless");

        let site = FakeSite::new()
            .with_page(custom)
            .with_page(plain)
            .with_page(viewless);
        let entries = collect(&site, None, false);

        for entry in &entries {
            if entry.loc.ends_with("/custom") {
                assert_eq!(entry.priority, Some(0.8));
            } else {
                assert_eq!(entry.priority, None, "{}", entry.loc);
            }
        }
    }

    #[test]
    fn test_lastmod_is_date_of_latest_write() {
        let mut p = page(1, "/about");
        p.write_date = Some(Utc.with_ymd_and_hms(2024, 1, 10, 23, 0, 0).unwrap());
        p.view = Some(PageView {
            priority: 16,
            write_date: Some(Utc.with_ymd_and_hms(2024, 2, 3, 8, 30, 0).unwrap()),
        });
        let site = FakeSite::new().with_page(p).with_page(page(2, "/never"));

        let entries = collect(&site, None, false);

        assert_eq!(entries[0].lastmod, NaiveDate::from_ymd_opt(2024, 2, 3));
        assert_eq!(entries[1].lastmod, NaiveDate::from_ymd_opt(2024, 2, 3));
        assert_eq!(entries[3].loc, "/never");
        assert_eq!(entries[3].lastmod, None);
    }

    #[test]
    fn test_force_includes_hidden_pages() {
        let mut draft = page(1, "/draft");
        draft.website_published = false;
        let mut unindexed = page(2, "/secret");
        unindexed.website_indexed = false;
        let mut scheduled = page(3, "/soon");
        scheduled.date_publish = Some(now() + Duration::days(2));
        let site = FakeSite::new()
            .with_page(draft)
            .with_page(unindexed)
            .with_page(scheduled)
            .with_page(page(4, "/live"));

        let visible = collect(&site, None, false);
        assert_eq!(locs(&visible), ["/live", "/es/live", "/fr_FR/live"]);

        let forced = collect(&site, None, true);
        assert_eq!(forced.len(), 12);
    }

    #[test]
    fn test_filter_restricts_pages_only() {
        let site = FakeSite::new()
            .with_page(page(1, "/shop/cart"))
            .with_page(page(2, "/about"))
            .with_post(post(10, "/blog/news/sale-10"));

        let entries = collect(&site, Some("shop"), false);

        assert_eq!(
            locs(&entries),
            [
                "/shop/cart",
                "/es/shop/cart",
                "/fr_FR/shop/cart",
                "/blog/news/sale-10",
                "/es/blog/news/sale-10",
                "/fr_FR/blog/news/sale-10",
            ]
        );
    }

    #[test]
    fn test_failing_post_is_skipped_without_aborting() {
        let mut site = FakeSite::new()
            .with_post(post(10, "/blog/a-10"))
            .with_post(post(11, "/blog/b-11"))
            .with_post(post(12, "/blog/c-12"));
        site.failing_posts.insert(11);

        let clock = FixedClock(now());
        let log = SkipLog::new();
        let mut entries = SitemapEnumerator::new(SiteBackends::from_store(&site))
            .with_clock(&clock)
            .with_observer(&log)
            .enumerate(None, false);
        let collected: Vec<SitemapEntry> = entries.by_ref().map(Result::unwrap).collect();

        assert_eq!(collected.len(), 6);
        assert!(collected.iter().all(|e| !e.loc.contains("b-11")));
        assert_eq!(collected[5].loc, "/fr_FR/blog/c-12");

        assert_eq!(log.len(), 3);
        assert!(log
            .skipped()
            .iter()
            .all(|s| s.post_id == 11 && matches!(s.reason, SkipReason::Failed(_))));
        assert_eq!(entries.stats().skipped_post_urls, 3);
    }

    #[test]
    fn test_missing_translation_is_skipped() {
        let mut translated = post(10, "");
        translated
            .translated_urls
            .insert("fr_FR".to_string(), "/blog/fr/bonjour-10".to_string());
        let site = FakeSite::new().with_post(translated);

        let log = SkipLog::new();
        let clock = FixedClock(now());
        let entries: Vec<SitemapEntry> = SitemapEnumerator::new(SiteBackends::from_store(&site))
            .with_clock(&clock)
            .with_observer(&log)
            .enumerate(None, false)
            .map(Result::unwrap)
            .collect();

        assert_eq!(locs(&entries), ["/fr_FR/blog/fr/bonjour-10"]);
        let skipped = log.skipped();
        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0].lang_code, "en_US");
        assert_eq!(skipped[1].lang_code, "es_MX");
        assert!(skipped.iter().all(|s| s.reason == SkipReason::MissingUrl));
    }

    #[test]
    fn test_domain_prefix_is_stripped_from_post_urls() {
        let site = FakeSite::new()
            .with_post(post(10, "https://shop.example.com/blog/news/hello-10"))
            .with_post(post(11, "https://other.example.org/blog/x-11"));

        let entries = collect(&site, None, false);

        assert_eq!(entries[0].loc, "/blog/news/hello-10");
        assert_eq!(entries[1].loc, "/es/blog/news/hello-10");
        assert_eq!(entries[3].loc, "https://other.example.org/blog/x-11");
        assert!(entries.iter().all(|e| e.priority.is_none() && e.lastmod.is_none()));
    }

    #[test]
    fn test_unpublished_and_foreign_posts_are_excluded() {
        let mut draft = post(10, "/blog/draft-10");
        draft.website_published = false;
        let mut foreign = post(11, "/blog/foreign-11");
        foreign.website_id = Some(2);
        let mut future = post(12, "/blog/future-12");
        future.post_date = Some(now() + Duration::minutes(5));
        let mut own = post(13, "/blog/own-13");
        own.website_id = Some(1);

        let site = FakeSite::new()
            .with_post(draft)
            .with_post(foreign)
            .with_post(future)
            .with_post(own);
        let entries = collect(&site, None, true);

        assert_eq!(
            locs(&entries),
            ["/blog/own-13", "/es/blog/own-13", "/fr_FR/blog/own-13"]
        );
    }

    #[test]
    fn test_missing_default_language_falls_back_to_en_us() {
        let mut site = FakeSite::new().with_page(page(1, "/about"));
        site.website.default_lang_id = None;

        let entries = collect(&site, None, false);
        assert_eq!(locs(&entries), ["/about", "/es/about", "/fr_FR/about"]);

        site.website.default_lang_id = Some(99);
        let entries = collect(&site, None, false);
        assert_eq!(locs(&entries)[0], "/about");
    }

    #[test]
    fn test_configured_fallback_language() {
        let mut site = FakeSite::new().with_page(page(1, "/about"));
        site.website.default_lang_id = None;
        let options = EnumerationOptions {
            fallback_language: "fr_FR".to_string(),
            ..EnumerationOptions::default()
        };

        let clock = FixedClock(now());
        let entries: Vec<SitemapEntry> = SitemapEnumerator::new(SiteBackends::from_store(&site))
            .with_clock(&clock)
            .with_options(options)
            .enumerate(None, false)
            .map(Result::unwrap)
            .collect();

        assert_eq!(locs(&entries), ["/en_US/about", "/es/about", "/about"]);
    }

    #[test]
    fn test_inactive_languages_are_ignored() {
        let mut site = FakeSite::new().with_page(page(1, "/about"));
        site.languages[2].active = false;

        let entries = collect(&site, None, false);
        assert_eq!(locs(&entries), ["/about", "/es/about"]);
    }

    #[test]
    fn test_query_failure_is_yielded_once() {
        let mut site = FakeSite::new().with_page(page(1, "/about"));
        site.fail_page_query = true;

        let clock = FixedClock(now());
        let mut entries = SitemapEnumerator::new(SiteBackends::from_store(&site))
            .with_clock(&clock)
            .enumerate(None, false);

        match entries.next() {
            Some(Err(Error::Repository(msg))) => assert_eq!(msg, "connection reset"),
            other => panic!("expected repository error, got {other:?}"),
        }
        assert!(entries.next().is_none());
        assert!(entries.next().is_none());
        assert_eq!(site.post_queries.get(), 0);
    }

    #[test]
    fn test_queries_run_only_when_consumed() {
        let site = FakeSite::new()
            .with_page(page(1, "/about"))
            .with_post(post(10, "/blog/a-10"));
        let clock = FixedClock(now());
        let enumerator =
            SitemapEnumerator::new(SiteBackends::from_store(&site)).with_clock(&clock);

        let mut entries = enumerator.enumerate(None, false);
        assert_eq!(site.page_queries.get(), 0);

        assert_eq!(entries.next().unwrap().unwrap().loc, "/about");
        assert_eq!(site.page_queries.get(), 1);
        assert_eq!(site.post_queries.get(), 0);

        drop(entries);
        assert_eq!(site.post_queries.get(), 0);
    }

    #[test]
    fn test_each_enumeration_has_its_own_ledger() {
        let site = FakeSite::new().with_page(page(1, "/about"));
        let clock = FixedClock(now());
        let enumerator =
            SitemapEnumerator::new(SiteBackends::from_store(&site)).with_clock(&clock);

        assert_eq!(enumerator.enumerate(None, false).count(), 3);
        assert_eq!(enumerator.enumerate(None, false).count(), 3);
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.defaults.fallback_language = "de_DE".to_string();
        config.defaults.default_view_priority = 10;
        config.localization.short_prefixes.clear();

        let options = EnumerationOptions::from(&config);
        assert_eq!(options.fallback_language, "de_DE");
        assert_eq!(options.priority.default_priority, 10);
        assert!(options.short_prefixes.is_empty());
    }

    #[test]
    fn test_strip_domain() {
        assert_eq!(strip_domain("https://a.com/x", Some("https://a.com")), "/x");
        assert_eq!(strip_domain("/x", Some("https://a.com")), "/x");
        assert_eq!(strip_domain("https://a.com/x", None), "https://a.com/x");
        assert_eq!(
            strip_domain("https://a.com/r?next=https://a.com", Some("https://a.com")),
            "/r?next=https://a.com"
        );
    }
}
