//! Background-task helpers for the UI layer.
//!
//! All network work runs in spawned tasks that report back through the
//! `AppEvent` channel; nothing here blocks the event loop.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::sync::mpsc;

use crate::api::Article;
use crate::app::{App, AppEvent};
use crate::query::{skip_for, PER_PAGE};

/// Error message for articles without URLs.
pub(super) const ERR_ARTICLE_NO_URL: &str = "Article has no URL";

/// Wraps a future to catch panics and convert them to errors.
///
/// A panicking spawned task would otherwise vanish into tokio's runtime;
/// this converts the panic payload into an `Err(String)` the event handler
/// can surface.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic payload".to_string()
            }
        })
}

/// Spawn a fetch for `page`, superseding any fetch already in flight.
///
/// The previous task is aborted outright; the generation token covers the
/// window where an aborted task's response is already in the channel.
pub(super) fn spawn_page_fetch(app: &mut App, page: u32, event_tx: &mpsc::Sender<AppEvent>) {
    if let Some(handle) = app.fetch_handle.take() {
        handle.abort();
        tracing::debug!("Aborted superseded page fetch");
    }

    let generation = app.query.begin_fetch(page);
    let api = app.api.clone();
    let tx = event_tx.clone();
    let skip = skip_for(page);

    tracing::debug!(page, skip, generation, "Spawning page fetch");
    let handle = tokio::spawn(async move {
        match catch_task_panic(api.read_articles(skip, PER_PAGE as u64)).await {
            Ok(result) => {
                let _ = tx
                    .send(AppEvent::PageLoaded {
                        page,
                        generation,
                        result,
                    })
                    .await;
            }
            Err(error) => {
                tracing::error!(error = %error, "Page fetch task panicked");
                let _ = tx
                    .send(AppEvent::TaskPanicked {
                        task: "page_fetch",
                        error,
                    })
                    .await;
            }
        }
    });
    app.fetch_handle = Some(handle);
    app.needs_redraw = true;
}

/// Spawn a deletion for `article`, reporting completion via the channel.
pub(super) fn spawn_delete(app: &App, article: &Article, event_tx: &mpsc::Sender<AppEvent>) {
    let api = app.api.clone();
    let tx = event_tx.clone();
    let id = article.id.clone();
    let title = article.title.clone();

    tokio::spawn(async move {
        match catch_task_panic(api.delete_article(&id)).await {
            Ok(result) => {
                let _ = tx.send(AppEvent::ArticleDeleted { title, result }).await;
            }
            Err(error) => {
                let _ = tx
                    .send(AppEvent::TaskPanicked {
                        task: "delete",
                        error,
                    })
                    .await;
            }
        }
    });
}

/// Spawn a crawl trigger against the backend's content pipeline.
pub(super) fn spawn_crawl(app: &App, event_tx: &mpsc::Sender<AppEvent>) {
    let api = app.api.clone();
    let tx = event_tx.clone();

    tokio::spawn(async move {
        match catch_task_panic(api.trigger_crawl()).await {
            Ok(result) => {
                let _ = tx.send(AppEvent::CrawlTriggered { result }).await;
            }
            Err(error) => {
                let _ = tx
                    .send(AppEvent::TaskPanicked {
                        task: "crawl",
                        error,
                    })
                    .await;
            }
        }
    });
}
