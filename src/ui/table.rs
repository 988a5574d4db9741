//! The article table: pending view, empty state, or rows.
//!
//! State priority follows the query result: an unresolved first load shows
//! the pending view; a resolved page with zero rows shows the empty state
//! (even when the total count is nonzero, i.e. the page lies past the end);
//! otherwise rows render, dimmed while they belong to a superseded page.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::api::Article;
use crate::app::App;
use crate::query::{total_pages, PageView};
use crate::util::{strip_control_chars, truncate_to_width};

/// Frames of the loading spinner, indexed by `App::spinner_frame`.
pub(super) const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const COLUMNS: [&str; 7] = ["ID", "Title", "Type", "Url", "Description", "Audio", "Actions"];

fn column_constraints() -> [Constraint; 7] {
    [
        Constraint::Length(10),
        Constraint::Percentage(24),
        Constraint::Length(8),
        Constraint::Percentage(22),
        Constraint::Percentage(32),
        Constraint::Length(6),
        Constraint::Length(7),
    ]
}

/// Render the article table area.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    match app.query.view() {
        PageView::Pending => render_pending(f, app, area),
        PageView::Empty { .. } => render_empty(f, app, area),
        PageView::Rows {
            articles,
            count,
            placeholder,
            fetched_at,
        } => render_rows(f, app, area, articles, count, placeholder, fetched_at),
    }
}

/// Initial load: nothing to show yet.
fn render_pending(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .title(" Articles ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
    let lines = vec![
        Line::default(),
        Line::styled(format!("{spinner} Loading articles..."), app.style("pending")),
    ];
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered_band(inner, 4),
    );
}

/// Zero rows on a resolved page.
fn render_empty(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .title(" Articles ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::styled("🔎", app.style("empty_icon")),
        Line::default(),
        Line::styled("You don't have any resources yet", app.style("empty_title")),
        Line::styled("Add a new resource to get started", app.style("empty_desc")),
    ];
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered_band(inner, 5),
    );
}

#[allow(clippy::too_many_arguments)]
fn render_rows(
    f: &mut Frame,
    app: &App,
    area: Rect,
    articles: &[Article],
    count: u64,
    placeholder: bool,
    fetched_at: DateTime<Utc>,
) {
    let mut title = format!(
        " Articles · page {}/{} · {} items · synced {} ",
        app.current_page(),
        total_pages(count),
        count,
        sync_age(fetched_at, Utc::now()),
    );
    if app.query.is_loading() {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        title.push_str(spinner);
        title.push(' ');
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border_focused"))
        .title(title);
    let inner = block.inner(area);

    // Solve the column layout up front so cells can be truncated with a
    // proper ellipsis instead of hard-clipped by the widget.
    let widths = column_constraints();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(inner);
    let col_width = |i: usize| (columns[i].width as usize).saturating_sub(1);

    let header = Row::new(
        COLUMNS
            .iter()
            .map(|h| Cell::from(*h))
            .collect::<Vec<_>>(),
    )
    .style(app.style("table_header"));

    let rows: Vec<Row> = articles
        .iter()
        .enumerate()
        .map(|(i, article)| {
            let mut style = if i == app.selected_row {
                app.style("row_selected")
            } else {
                app.style("row_normal")
            };
            if placeholder {
                style = style.patch(app.style("row_placeholder"));
            }

            let description = match article.abstract_text() {
                Some(text) => Cell::from(Line::from(Span::raw(
                    truncate_to_width(&strip_control_chars(text), col_width(4)).into_owned(),
                ))),
                None => Cell::from(Line::styled("N/A", app.style("cell_missing"))),
            };
            let audio = match article.audio_text() {
                Some(text) => Cell::from(truncate_to_width(text, col_width(5)).into_owned()),
                None => Cell::from(Line::styled("-", app.style("cell_meta"))),
            };

            Row::new(vec![
                Cell::from(truncate_to_width(&article.id, col_width(0)).into_owned()),
                Cell::from(
                    truncate_to_width(&strip_control_chars(&article.title), col_width(1))
                        .into_owned(),
                ),
                Cell::from(truncate_to_width(&article.article_type, col_width(2)).into_owned()),
                Cell::from(Line::styled(
                    truncate_to_width(&article.url, col_width(3)).into_owned(),
                    app.style("cell_meta"),
                )),
                description,
                audio,
                Cell::from("⋮"),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}

/// A short horizontal band vertically centered within `area`.
fn centered_band(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let top = (area.height - height) / 2;
    Rect::new(area.x, area.y + top, area.width, height)
}

/// Age of the displayed data, coarse on purpose.
fn sync_age(fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - fetched_at).num_seconds().max(0);
    if secs < 60 {
        format!("{secs}s ago")
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    }
}
