//! Key dispatch for the console.
//!
//! Input is routed by overlay priority: confirmation dialog, then action
//! menu, then help, then the table itself.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use crate::app::{
    ActionMenuState, App, AppEvent, ConfirmAction, ACTION_MENU_ITEMS,
};
use crate::query::total_pages;

use super::helpers;
use super::loop_runner::Action;

pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    // Ctrl+C always quits, whatever is on screen.
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(Action::Quit);
    }

    if app.pending_confirm.is_some() {
        handle_confirm_input(app, code, event_tx);
        return Ok(Action::Continue);
    }

    if app.action_menu.is_some() {
        handle_menu_input(app, code);
        return Ok(Action::Continue);
    }

    if app.show_help {
        // Any key dismisses the help overlay.
        app.show_help = false;
        return Ok(Action::Continue);
    }

    match code {
        KeyCode::Char('q') => return Ok(Action::Quit),

        // Paging
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => {
            if let Some(target) = app.prev_page_target() {
                go_to_page(app, target, event_tx);
            }
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => {
            if let Some(target) = app.next_page_target() {
                go_to_page(app, target, event_tx);
            }
        }
        KeyCode::Char('g') => {
            if app.current_page() != 1 {
                go_to_page(app, 1, event_tx);
            }
        }
        KeyCode::Char('G') => {
            if let Some(count) = app.query.known_count() {
                let last = total_pages(count);
                if app.current_page() != last {
                    go_to_page(app, last, event_tx);
                }
            }
        }

        // Row selection
        KeyCode::Up | KeyCode::Char('k') => app.nav_up(),
        KeyCode::Down | KeyCode::Char('j') => app.nav_down(),

        // Refresh the current page
        KeyCode::Char('r') => {
            helpers::spawn_page_fetch(app, app.current_page(), event_tx);
        }

        // Ask the backend to crawl pending content
        KeyCode::Char('c') => {
            helpers::spawn_crawl(app, event_tx);
            app.set_status("Requesting crawl...");
        }

        // Per-row actions
        KeyCode::Enter | KeyCode::Char('a') => {
            if let Some(article) = app.selected_article().cloned() {
                app.action_menu = Some(ActionMenuState {
                    article,
                    selected: 0,
                });
            }
        }
        KeyCode::Char('o') => {
            if let Some(article) = app.selected_article().cloned() {
                open_in_browser(app, &article.url);
            }
        }

        KeyCode::Char('t') => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {name}"));
        }
        KeyCode::Char('?') => app.show_help = true,

        _ => {}
    }

    Ok(Action::Continue)
}

fn go_to_page(app: &mut App, target: u32, event_tx: &mpsc::Sender<AppEvent>) {
    if app.set_page(target) {
        helpers::spawn_page_fetch(app, target, event_tx);
    }
}

fn handle_menu_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.action_menu = None;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(menu) = app.action_menu.as_mut() {
                menu.selected = menu.selected.saturating_sub(1);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(menu) = app.action_menu.as_mut() {
                menu.selected = (menu.selected + 1).min(ACTION_MENU_ITEMS.len() - 1);
            }
        }
        KeyCode::Enter => {
            if let Some(menu) = app.action_menu.take() {
                match menu.selected {
                    0 => open_in_browser(app, &menu.article.url),
                    1 => {
                        app.pending_confirm = Some(ConfirmAction::DeleteArticle {
                            article: menu.article,
                        });
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

fn handle_confirm_input(app: &mut App, code: KeyCode, event_tx: &mpsc::Sender<AppEvent>) {
    match code {
        KeyCode::Char('y') => {
            if let Some(ConfirmAction::DeleteArticle { article }) = app.pending_confirm.take() {
                helpers::spawn_delete(app, &article, event_tx);
                app.set_status(format!("Deleting \"{}\"...", article.title));
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.pending_confirm = None;
        }
        _ => {}
    }
}

fn open_in_browser(app: &mut App, url: &str) {
    if url.is_empty() {
        app.set_status(helpers::ERR_ARTICLE_NO_URL);
        return;
    }
    match open::that(url) {
        Ok(()) => tracing::info!(url = %url, "Opened in browser"),
        Err(e) => {
            tracing::error!(url = %url, error = %e, "Failed to open browser");
            app.set_status(format!("Failed to open browser: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, Article, ArticlePage};
    use crate::route::Location;
    use crate::theme::ThemeVariant;
    use std::time::Duration;

    fn test_app() -> App {
        let api =
            ApiClient::new("https://api.example.com/v1", Duration::from_secs(5), None).unwrap();
        App::new(api, Location::default(), ThemeVariant::Dark)
    }

    fn article(id: &str) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Title {id}"),
            article_type: "blog".to_string(),
            url: format!("http://example.com/{id}"),
            ai_abstract: None,
            audio: None,
            created_at: None,
        }
    }

    fn load_rows(app: &mut App, rows: usize, count: u64) {
        let page = app.current_page();
        let generation = app.query.begin_fetch(page);
        let data = ArticlePage {
            data: (0..rows).map(|i| article(&format!("a{i}"))).collect(),
            count,
        };
        app.query.complete(page, generation, data);
    }

    #[tokio::test]
    async fn q_quits() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::channel(4);
        let action = handle_input(&mut app, KeyCode::Char('q'), KeyModifiers::NONE, &tx).unwrap();
        assert!(matches!(action, Action::Quit));
    }

    #[tokio::test]
    async fn prev_disabled_on_first_page() {
        let mut app = test_app();
        load_rows(&mut app, 5, 12);
        let (tx, _rx) = mpsc::channel(4);
        handle_input(&mut app, KeyCode::Left, KeyModifiers::NONE, &tx).unwrap();
        assert_eq!(app.current_page(), 1);
    }

    #[tokio::test]
    async fn next_advances_and_spawns_fetch() {
        use wiremock::matchers::{method, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("skip", "5"))
            .and(query_param("limit", "5"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"data": [], "count": 12}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri(), Duration::from_secs(5), None).unwrap();
        let mut app = App::new(api, Location::default(), ThemeVariant::Dark);
        load_rows(&mut app, 5, 12);
        let (tx, mut rx) = mpsc::channel(4);

        handle_input(&mut app, KeyCode::Right, KeyModifiers::NONE, &tx).unwrap();
        assert_eq!(app.current_page(), 2);

        // A fetch for page 2 was spawned.
        let event = rx.recv().await.expect("fetch should report");
        match event {
            AppEvent::PageLoaded { page, result, .. } => {
                assert_eq!(page, 2);
                assert!(result.is_ok());
            }
            _ => panic!("expected PageLoaded"),
        }
    }

    #[tokio::test]
    async fn next_disabled_on_last_page() {
        let mut app = test_app();
        app.set_page(3);
        load_rows(&mut app, 2, 12);
        let (tx, _rx) = mpsc::channel(4);
        handle_input(&mut app, KeyCode::Right, KeyModifiers::NONE, &tx).unwrap();
        assert_eq!(app.current_page(), 3);
    }

    #[tokio::test]
    async fn enter_opens_menu_on_selected_row() {
        let mut app = test_app();
        load_rows(&mut app, 3, 3);
        app.selected_row = 1;
        let (tx, _rx) = mpsc::channel(4);

        handle_input(&mut app, KeyCode::Enter, KeyModifiers::NONE, &tx).unwrap();
        let menu = app.action_menu.as_ref().expect("menu should open");
        assert_eq!(menu.article.id, "a1");
    }

    #[tokio::test]
    async fn enter_is_noop_while_pending() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::channel(4);
        handle_input(&mut app, KeyCode::Enter, KeyModifiers::NONE, &tx).unwrap();
        assert!(app.action_menu.is_none());
    }

    #[tokio::test]
    async fn menu_delete_requires_confirmation() {
        let mut app = test_app();
        load_rows(&mut app, 1, 1);
        let (tx, _rx) = mpsc::channel(4);

        handle_input(&mut app, KeyCode::Enter, KeyModifiers::NONE, &tx).unwrap();
        handle_input(&mut app, KeyCode::Down, KeyModifiers::NONE, &tx).unwrap();
        handle_input(&mut app, KeyCode::Enter, KeyModifiers::NONE, &tx).unwrap();

        assert!(app.action_menu.is_none());
        assert!(matches!(
            app.pending_confirm,
            Some(ConfirmAction::DeleteArticle { .. })
        ));
    }

    #[tokio::test]
    async fn confirm_n_cancels_delete() {
        let mut app = test_app();
        load_rows(&mut app, 1, 1);
        app.pending_confirm = Some(ConfirmAction::DeleteArticle {
            article: article("a0"),
        });
        let (tx, _rx) = mpsc::channel(4);

        handle_input(&mut app, KeyCode::Char('n'), KeyModifiers::NONE, &tx).unwrap();
        assert!(app.pending_confirm.is_none());
    }
}
