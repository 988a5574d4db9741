//! Render dispatch for the console.
//!
//! Lays out heading, table, paginator, and status bar, then stacks overlays
//! (help, action menu, confirmation) on top.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

use super::{help, menu, paginator, status, table};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Main render function.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Guard against zero-size areas before any layout math.
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // heading
            Constraint::Min(0),    // table
            Constraint::Length(1), // paginator
            Constraint::Length(1), // status bar
        ])
        .split(area);

    render_heading(f, app, chunks[0]);
    table::render(f, app, chunks[1]);
    paginator::render(f, app, chunks[2]);
    status::render(f, app, chunks[3]);

    if app.show_help {
        help::render(f, app);
    }
    if let Some(ref state) = app.action_menu {
        menu::render_action_menu(f, app, state);
    }
    if let Some(ref confirm) = app.pending_confirm {
        menu::render_confirm(f, app, confirm);
    }
}

fn render_heading(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let line = Line::from(vec![
        Span::styled(" Article Management ", app.style("table_header")),
        Span::styled(format!(" {}", app.location), app.style("cell_meta")),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
