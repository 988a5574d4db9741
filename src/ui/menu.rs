//! Per-row action menu and the delete confirmation overlay.

use ratatui::{
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{ActionMenuState, App, ConfirmAction, ACTION_MENU_ITEMS};
use crate::util::truncate_to_width;

/// Render the action menu popup for the row it was opened on.
pub(super) fn render_action_menu(f: &mut Frame, app: &App, menu: &ActionMenuState) {
    let area = popup_area(f.area(), 34, ACTION_MENU_ITEMS.len() as u16 + 2);

    let items: Vec<ListItem> = ACTION_MENU_ITEMS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let style = if i == menu.selected {
                app.style("menu_selected")
            } else {
                app.style("menu_item")
            };
            ListItem::new(Line::styled(format!(" {label} "), style))
        })
        .collect();

    let title = format!(
        " {} ",
        truncate_to_width(&menu.article.title, area.width.saturating_sub(4) as usize)
    );
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("panel_border_focused"))
            .title(title)
            .title_style(app.style("menu_title")),
    );

    f.render_widget(Clear, area);
    f.render_widget(list, area);
}

/// Render the confirmation dialog for destructive operations.
pub(super) fn render_confirm(f: &mut Frame, app: &App, confirm: &ConfirmAction) {
    let area = popup_area(f.area(), 44, 5);

    let text = match confirm {
        ConfirmAction::DeleteArticle { article } => {
            format!(
                "Delete \"{}\"?\n\nThis removes it from the backend.",
                truncate_to_width(&article.title, 30)
            )
        }
    };

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("panel_border_focused"))
            .title(" Confirm "),
    );

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

/// A centered popup rect clamped to the available screen.
fn popup_area(screen: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(screen.width);
    let height = height.min(screen.height);
    Rect::new(
        screen.x + (screen.width - width) / 2,
        screen.y + (screen.height - height) / 2,
        width,
        height,
    )
}
