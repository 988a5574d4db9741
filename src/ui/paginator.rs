//! Pagination controls: prev/next triggers plus a window of page indices.
//!
//! Bound to the total count and the fixed page size; the edges disable
//! themselves rather than clamping (paging past the end is impossible from
//! here, though a deep link can still land there).

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::query::{total_pages, PageView};

/// One element of the rendered page index row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Segment {
    Page(u32),
    Ellipsis,
}

/// Build the window of page segments around `current`.
///
/// Small sets list every page; larger sets anchor the first and last page
/// and elide the middle, the way pagination components do.
pub(super) fn page_segments(current: u32, total: u32) -> Vec<Segment> {
    use Segment::*;

    if total <= 7 {
        return (1..=total).map(Page).collect();
    }

    let mut segments = vec![Page(1)];
    if current > 3 {
        segments.push(Ellipsis);
    }
    let lo = current.saturating_sub(1).max(2);
    let hi = (current + 1).min(total - 1);
    for p in lo..=hi {
        segments.push(Page(p));
    }
    if current + 2 < total {
        segments.push(Ellipsis);
    }
    segments.push(Page(total));
    segments
}

/// Render the paginator line. Hidden until a page has resolved; shown with
/// zero rows when the total is nonzero (a page past the end).
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let count = match app.query.view() {
        PageView::Rows { count, .. } => count,
        PageView::Empty { count } if count > 0 => count,
        _ => return,
    };

    let current = app.current_page();
    let total = total_pages(count);

    let mut spans = Vec::new();

    let prev_style = if app.prev_page_target().is_some() {
        app.style("page_inactive")
    } else {
        app.style("page_disabled")
    };
    spans.push(Span::styled("‹ Prev ", prev_style));

    for segment in page_segments(current, total) {
        match segment {
            Segment::Page(p) if p == current => {
                spans.push(Span::styled(format!(" {p} "), app.style("page_active")));
            }
            Segment::Page(p) => {
                spans.push(Span::styled(format!(" {p} "), app.style("page_inactive")));
            }
            Segment::Ellipsis => {
                spans.push(Span::styled(" … ", app.style("page_disabled")));
            }
        }
    }

    let next_style = if app.next_page_target().is_some() {
        app.style("page_inactive")
    } else {
        app.style("page_disabled")
    };
    spans.push(Span::styled(" Next ›", next_style));

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        area,
    );
}
