//! Help overlay listing the keybindings.

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

const HELP_TEXT: &str = "\
 Navigation
   ←/h/p        previous page
   →/l/n        next page
   g / G        first / last page
   j/k or ↓/↑   move row selection

 Actions
   Enter / a    open action menu for the row
   o            open article in browser
   r            refresh current page
   c            trigger backend crawl

 Other
   t            cycle theme
   ?            this help
   q            quit";

/// Render the help overlay centered on screen.
pub(super) fn render(f: &mut Frame, app: &App) {
    let screen = f.area();
    let width = 44u16.min(screen.width);
    let height = 20u16.min(screen.height);
    let area = Rect::new(
        screen.x + (screen.width - width) / 2,
        screen.y + (screen.height - height) / 2,
        width,
        height,
    );

    let paragraph = Paragraph::new(HELP_TEXT).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("panel_border_focused"))
            .title(" Help (any key to close) "),
    );

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
