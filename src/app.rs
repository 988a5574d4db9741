use std::borrow::Cow;

use ratatui::style::Style;
use tokio::time::Instant;

use crate::api::{ApiClient, ApiError, Article, ArticlePage};
use crate::query::{total_pages, PageQuery, PageView};
use crate::route::Location;
use crate::theme::{StyleMap, ThemeVariant};

// ============================================================================
// Events from background tasks
// ============================================================================

pub enum AppEvent {
    /// A page fetch finished.
    ///
    /// Fields:
    /// - `page`: The page this response answers
    /// - `generation`: The generation counter when the fetch was spawned
    /// - `result`: The decoded page or the error that ended the fetch
    PageLoaded {
        page: u32,
        generation: u64,
        result: Result<ArticlePage, ApiError>,
    },
    /// An article deletion finished. `title` is kept for status display.
    ArticleDeleted {
        title: String,
        result: Result<(), ApiError>,
    },
    /// The backend accepted (or rejected) a crawl trigger.
    CrawlTriggered { result: Result<(), ApiError> },
    /// A background task panicked.
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// Overlay state
// ============================================================================

/// Items in the per-row action menu.
pub const ACTION_MENU_ITEMS: &[&str] = &["Open in Browser", "Delete"];

/// State for the per-row action menu popup.
pub struct ActionMenuState {
    /// The article the menu was opened on. Owned copy: the underlying rows
    /// can be swapped by a completing fetch while the menu is open.
    pub article: Article,
    pub selected: usize,
}

/// Pending confirmation for destructive operations.
pub enum ConfirmAction {
    /// Delete an article from the backend.
    DeleteArticle { article: Article },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state.
pub struct App {
    pub api: ApiClient,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    // Navigation + data
    /// Current location; `page` lives in its query parameters.
    pub location: Location,
    /// Pagination state machine (cache, placeholder, generations).
    pub query: PageQuery,

    // UI state
    pub selected_row: usize,
    pub needs_redraw: bool,
    /// Current frame of the pending spinner animation.
    pub spinner_frame: usize,
    pub show_help: bool,

    // Status message with expiry
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    // Overlays
    pub action_menu: Option<ActionMenuState>,
    pub pending_confirm: Option<ConfirmAction>,

    /// Handle to the live page fetch, if any. Starting a new fetch aborts
    /// the previous task; the generation counter catches anything the abort
    /// races with.
    pub fetch_handle: Option<tokio::task::JoinHandle<()>>,
}

impl App {
    pub fn new(api: ApiClient, location: Location, theme_variant: ThemeVariant) -> Self {
        let mut query = PageQuery::new();
        query.set_page(location.page());

        Self {
            api,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            location,
            query,
            selected_row: 0,
            needs_redraw: true,
            spinner_frame: 0,
            show_help: false,
            status_message: None,
            action_menu: None,
            pending_confirm: None,
            fetch_handle: None,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Switch to a different theme variant at runtime.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant. Returns its name for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    pub fn current_page(&self) -> u32 {
        self.query.current_page()
    }

    /// Navigate to `page`: merge it into the location's query parameters and
    /// retarget the page query. Returns false when already there. The caller
    /// spawns the fetch.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if page == self.current_page() {
            return false;
        }
        self.location = self.location.with_page(page);
        self.query.set_page(page);
        self.selected_row = 0;
        self.needs_redraw = true;
        tracing::debug!(page, location = %self.location, "Navigated");
        true
    }

    /// Target for a "next page" transition, if one exists. Gated by the
    /// known total; with no resolved count yet there is nothing to page to.
    pub fn next_page_target(&self) -> Option<u32> {
        let count = self.query.known_count()?;
        let page = self.current_page();
        (page < total_pages(count)).then(|| page + 1)
    }

    /// Target for a "previous page" transition, if one exists.
    pub fn prev_page_target(&self) -> Option<u32> {
        let page = self.current_page();
        (page > 1).then(|| page - 1)
    }

    /// Rows currently on screen (zero while pending or empty).
    pub fn visible_row_count(&self) -> usize {
        match self.query.view() {
            PageView::Rows { articles, .. } => articles.len(),
            _ => 0,
        }
    }

    /// The article under the selection cursor, if rows are showing.
    pub fn selected_article(&self) -> Option<&Article> {
        match self.query.view() {
            PageView::Rows { articles, .. } => articles.get(self.selected_row),
            _ => None,
        }
    }

    /// Move the row selection up.
    pub fn nav_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    /// Move the row selection down.
    pub fn nav_down(&mut self) {
        let rows = self.visible_row_count();
        if rows > 0 {
            let max_index = rows - 1;
            self.selected_row = self.selected_row.saturating_add(1).min(max_index);
        }
    }

    /// Clamp the row selection after the row set changed under it.
    pub fn clamp_selection(&mut self) {
        let rows = self.visible_row_count();
        self.selected_row = if rows == 0 {
            0
        } else {
            self.selected_row.min(rows - 1)
        };
    }

    /// Set status message (auto-expires after 3 seconds).
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear the status message if expired. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

/// Abort the in-flight fetch on exit so no orphaned task outlives the loop.
impl Drop for App {
    fn drop(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
            tracing::debug!("Aborted page fetch task on App drop");
        }
    }
}
