//! Page-keyed query state for the article table.
//!
//! The table never blocks on the network: results are cached per page, the
//! last resolved page keeps rendering (dimmed) while its replacement loads,
//! and a generation counter rejects responses from superseded fetches. The
//! first load is the one exception: with nothing to show, a pending view
//! renders until data arrives.

use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lru::LruCache;

use crate::api::{Article, ArticlePage};

/// Fixed page size. The request limits to this and the rows are re-truncated
/// client-side; a backend that over-returns cannot overflow the table.
pub const PER_PAGE: usize = 5;

/// Pages kept for instant back/forward navigation.
const CACHE_PAGES: usize = 16;

/// `skip` offset for a 1-indexed page.
pub fn skip_for(page: u32) -> u64 {
    u64::from(page - 1) * PER_PAGE as u64
}

/// Number of page segments the paginator offers for `count` total rows.
pub fn total_pages(count: u64) -> u32 {
    let pages = count.div_ceil(PER_PAGE as u64).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// A resolved fetch result pinned to the page it answers.
#[derive(Clone)]
struct ResolvedPage {
    page: u32,
    data: Arc<ArticlePage>,
    fetched_at: DateTime<Utc>,
}

/// What the table should render right now, in priority order.
#[derive(Debug)]
pub enum PageView<'a> {
    /// First load: nothing resolved yet.
    Pending,
    /// A page resolved with zero rows. `count` may still be nonzero when the
    /// page lies past the end of the record set.
    Empty { count: u64 },
    /// Rows to draw. `placeholder` means the rows belong to a previously
    /// resolved page and the current page is still in flight; render dimmed.
    Rows {
        articles: &'a [Article],
        count: u64,
        placeholder: bool,
        fetched_at: DateTime<Utc>,
    },
}

/// The pagination state machine.
pub struct PageQuery {
    current_page: u32,
    cache: LruCache<u32, ResolvedPage>,
    last_good: Option<ResolvedPage>,
    in_flight: Option<u32>,
    generation: u64,
}

impl PageQuery {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            cache: LruCache::new(NonZeroUsize::new(CACHE_PAGES).expect("nonzero cache size")),
            last_good: None,
            in_flight: None,
            generation: 0,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Total count from the most recent resolved page, if any.
    pub fn known_count(&self) -> Option<u64> {
        self.last_good.as_ref().map(|r| r.data.count)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Switch the query to `page`.
    ///
    /// A cache hit becomes the displayed result immediately (no dimming);
    /// on a miss the previous result stays on screen as a placeholder until
    /// the fetch for the new page completes.
    pub fn set_page(&mut self, page: u32) {
        debug_assert!(page >= 1, "pages are 1-indexed");
        self.current_page = page;
        if let Some(resolved) = self.cache.get(&page) {
            self.last_good = Some(resolved.clone());
        }
    }

    /// Register a new fetch and return its generation token.
    ///
    /// Any response carrying an older token is discarded on arrival, so a
    /// fetch abandoned by rapid paging can never overwrite a newer result.
    pub fn begin_fetch(&mut self, page: u32) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = Some(page);
        self.generation
    }

    /// Apply a completed fetch. Returns false when the response is stale.
    pub fn complete(&mut self, page: u32, generation: u64, result: ArticlePage) -> bool {
        if generation != self.generation {
            tracing::debug!(
                page,
                generation,
                current = self.generation,
                "Discarding stale page response"
            );
            return false;
        }
        self.in_flight = None;

        let resolved = ResolvedPage {
            page,
            data: Arc::new(result),
            fetched_at: Utc::now(),
        };
        self.cache.put(page, resolved.clone());
        if page == self.current_page {
            self.last_good = Some(resolved);
        }
        true
    }

    /// Record a failed fetch. Returns false when the failure is stale.
    /// Nothing is cached; the last resolved page keeps rendering.
    pub fn fail(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.in_flight = None;
        true
    }

    /// Resolve what the table should render.
    pub fn view(&self) -> PageView<'_> {
        let Some(resolved) = &self.last_good else {
            return PageView::Pending;
        };

        // Defensive re-truncation; the request already limits to PER_PAGE.
        let len = resolved.data.data.len().min(PER_PAGE);
        let articles = &resolved.data.data[..len];

        if articles.is_empty() {
            return PageView::Empty {
                count: resolved.data.count,
            };
        }

        PageView::Rows {
            articles,
            count: resolved.data.count,
            placeholder: resolved.page != self.current_page,
            fetched_at: resolved.fetched_at,
        }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new()
    }
}
