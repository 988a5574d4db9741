//! Theme system for the console.
//!
//! Semantic color roles map to ratatui `Style` values. `ThemeVariant`
//! selects between Dark and Light palettes, and `StyleMap` resolves role
//! names to concrete styles at render time.

use std::collections::HashMap;

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette: semantic roles to Style
// ============================================================================

/// A complete palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Table --
    pub table_header: Style,
    pub row_normal: Style,
    pub row_selected: Style,
    /// Applied on top of row styles while the rows belong to a superseded
    /// page and the current page is still loading.
    pub row_placeholder: Style,
    pub cell_missing: Style,
    pub cell_meta: Style,

    // -- Empty / pending states --
    pub empty_icon: Style,
    pub empty_title: Style,
    pub empty_desc: Style,
    pub pending: Style,

    // -- Paginator --
    pub page_active: Style,
    pub page_inactive: Style,
    pub page_disabled: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,

    // -- Action menu --
    pub menu_item: Style,
    pub menu_selected: Style,
    pub menu_title: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            table_header: Style::default().add_modifier(Modifier::BOLD),
            row_normal: Style::default(),
            row_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            row_placeholder: Style::default().add_modifier(Modifier::DIM),
            cell_missing: Style::default().fg(Color::Gray),
            cell_meta: Style::default().fg(Color::DarkGray),

            empty_icon: Style::default().fg(Color::Cyan),
            empty_title: Style::default().add_modifier(Modifier::BOLD),
            empty_desc: Style::default().fg(Color::Gray),
            pending: Style::default().fg(Color::Cyan),

            page_active: Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            page_inactive: Style::default().fg(Color::Gray),
            page_disabled: Style::default().fg(Color::DarkGray),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),

            menu_item: Style::default(),
            menu_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            menu_title: Style::default().add_modifier(Modifier::BOLD),
        }
    }

    fn light() -> Self {
        Self {
            table_header: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            row_normal: Style::default().fg(Color::Black),
            row_selected: Style::default().bg(Color::Blue).fg(Color::White),
            row_placeholder: Style::default().add_modifier(Modifier::DIM),
            cell_missing: Style::default().fg(Color::DarkGray),
            cell_meta: Style::default().fg(Color::DarkGray),

            empty_icon: Style::default().fg(Color::Blue),
            empty_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            empty_desc: Style::default().fg(Color::DarkGray),
            pending: Style::default().fg(Color::Blue),

            page_active: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            page_inactive: Style::default().fg(Color::Black),
            page_disabled: Style::default().fg(Color::Gray),

            status_bar: Style::default().bg(Color::Gray).fg(Color::Black),
            panel_border: Style::default().fg(Color::Black),
            panel_border_focused: Style::default().fg(Color::Blue),

            menu_item: Style::default().fg(Color::Black),
            menu_selected: Style::default().bg(Color::Blue).fg(Color::White),
            menu_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// Role-name → `Style` lookup built from a palette.
///
/// Render code asks for roles by name; unknown roles resolve to the default
/// style rather than panicking mid-frame.
#[derive(Debug, Clone)]
pub struct StyleMap {
    styles: HashMap<&'static str, Style>,
}

impl StyleMap {
    pub fn from_palette(palette: &ColorPalette) -> Self {
        let mut styles = HashMap::new();
        styles.insert("table_header", palette.table_header);
        styles.insert("row_normal", palette.row_normal);
        styles.insert("row_selected", palette.row_selected);
        styles.insert("row_placeholder", palette.row_placeholder);
        styles.insert("cell_missing", palette.cell_missing);
        styles.insert("cell_meta", palette.cell_meta);
        styles.insert("empty_icon", palette.empty_icon);
        styles.insert("empty_title", palette.empty_title);
        styles.insert("empty_desc", palette.empty_desc);
        styles.insert("pending", palette.pending);
        styles.insert("page_active", palette.page_active);
        styles.insert("page_inactive", palette.page_inactive);
        styles.insert("page_disabled", palette.page_disabled);
        styles.insert("status_bar", palette.status_bar);
        styles.insert("panel_border", palette.panel_border);
        styles.insert("panel_border_focused", palette.panel_border_focused);
        styles.insert("menu_item", palette.menu_item);
        styles.insert("menu_selected", palette.menu_selected);
        styles.insert("menu_title", palette.menu_title);
        Self { styles }
    }

    /// Resolve a role name to its style. Unknown roles get the default.
    pub fn resolve(&self, role: &str) -> Style {
        self.styles.get(role).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_parses_case_insensitively() {
        assert_eq!(ThemeVariant::from_str_name("DARK"), Some(ThemeVariant::Dark));
        assert_eq!(
            ThemeVariant::from_str_name("light"),
            Some(ThemeVariant::Light)
        );
        assert_eq!(ThemeVariant::from_str_name("solarized"), None);
    }

    #[test]
    fn cycle_alternates() {
        assert_eq!(ThemeVariant::Dark.next(), ThemeVariant::Light);
        assert_eq!(ThemeVariant::Light.next(), ThemeVariant::Dark);
    }

    #[test]
    fn placeholder_role_is_dim() {
        let map = StyleMap::from_palette(&ThemeVariant::Dark.palette());
        let style = map.resolve("row_placeholder");
        assert!(style.add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn unknown_role_resolves_to_default() {
        let map = StyleMap::from_palette(&ThemeVariant::Dark.palette());
        assert_eq!(map.resolve("no_such_role"), Style::default());
    }
}
