use std::borrow::Cow;

use ratatui::{layout::Rect, widgets::Paragraph, Frame};

use crate::app::App;

/// Render the status bar: an active status message wins, otherwise
/// keybinding hints.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Cow avoids allocations for the static hint strings.
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.pending_confirm.is_some() {
        Cow::Borrowed("(y) Confirm  (n/Esc) Cancel")
    } else if app.action_menu.is_some() {
        Cow::Borrowed("[j/k]select [Enter]run [Esc]close")
    } else {
        Cow::Borrowed(
            "[←/→]page [j/k]rows [Enter]actions [r]efresh [c]rawl [o]pen [t]heme [?]help [q]uit",
        )
    };

    f.render_widget(Paragraph::new(text).style(app.style("status_bar")), area);
}
