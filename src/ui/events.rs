//! Application event handling.
//!
//! Processes background task completions: page fetches, deletions, crawl
//! triggers, and task panics. Stale page responses are rejected here by
//! generation token.

use tokio::sync::mpsc;

use crate::app::{App, AppEvent};

use super::helpers;

/// Handle an event from a background task, updating application state.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent, event_tx: &mpsc::Sender<AppEvent>) {
    match event {
        AppEvent::PageLoaded {
            page,
            generation,
            result,
        } => match result {
            Ok(data) => {
                let applied = app.query.complete(page, generation, data);
                if applied {
                    app.clamp_selection();
                    tracing::debug!(page, "Page applied");
                }
            }
            Err(e) => {
                if app.query.fail(generation) {
                    tracing::warn!(page, error = %e, "Page fetch failed");
                    app.set_status(format!("Failed to load page {page}: {e}"));
                }
            }
        },
        AppEvent::ArticleDeleted { title, result } => match result {
            Ok(()) => {
                tracing::info!(title = %title, "Article deleted");
                app.set_status(format!("Deleted \"{title}\""));
                // The page under the cursor changed on the server; refetch it.
                helpers::spawn_page_fetch(app, app.current_page(), event_tx);
            }
            Err(e) => {
                tracing::error!(title = %title, error = %e, "Article deletion failed");
                app.set_status(format!("Delete failed: {e}"));
            }
        },
        AppEvent::CrawlTriggered { result } => match result {
            Ok(()) => {
                app.set_status("Crawl triggered: backend is fetching content");
            }
            Err(e) => {
                tracing::error!(error = %e, "Crawl trigger failed");
                app.set_status(format!("Crawl failed: {e}"));
            }
        },
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error, "Background task panicked");
            app.set_status(format!("Internal error in {task} task"));
        }
    }
}
