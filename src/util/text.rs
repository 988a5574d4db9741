use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
///
/// CJK characters and most emoji occupy 2 columns; combining marks occupy 0.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncates a string to fit within `max_width` terminal columns, appending
/// "..." when text was cut off.
///
/// Returns `Cow::Borrowed` when the string already fits (no allocation on the
/// common render path). For widths of 3 columns or less there is no room for
/// "char + ellipsis", so as many characters as fit are returned without one.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if max_width == 0 {
        return Cow::Borrowed("");
    }
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    if max_width <= ELLIPSIS_WIDTH {
        let mut out = String::new();
        let mut used = 0;
        for ch in s.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > max_width {
                break;
            }
            used += w;
            out.push(ch);
        }
        return Cow::Owned(out);
    }

    let budget = max_width - ELLIPSIS_WIDTH;
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(ELLIPSIS);
    Cow::Owned(out)
}

/// Removes control characters from API-sourced text before it reaches the
/// terminal. Tab is preserved; everything else below U+0020 and DEL is
/// dropped so a hostile title cannot emit escape sequences.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| c.is_control() && c != '\t') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.chars()
            .filter(|c| !c.is_control() || *c == '\t')
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_ascii() {
        assert_eq!(display_width("Hello"), 5);
    }

    #[test]
    fn width_cjk() {
        assert_eq!(display_width("你好"), 4);
    }

    #[test]
    fn truncate_fits_borrows() {
        let s = "short";
        assert!(matches!(truncate_to_width(s, 10), Cow::Borrowed(_)));
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate_to_width("abcdefghij", 7), "abcd...");
    }

    #[test]
    fn truncate_zero_width() {
        assert_eq!(truncate_to_width("anything", 0), "");
    }

    #[test]
    fn truncate_narrow_no_ellipsis() {
        assert_eq!(truncate_to_width("abcdef", 2), "ab");
    }

    #[test]
    fn truncate_cjk_boundary() {
        // Each char is 2 columns; budget of 5-3=2 fits exactly one.
        assert_eq!(truncate_to_width("你好世界", 5), "你...");
    }

    #[test]
    fn strip_escape_sequences() {
        assert_eq!(strip_control_chars("a\x1b[31mb"), "a[31mb");
    }

    #[test]
    fn strip_preserves_tab() {
        assert_eq!(strip_control_chars("a\tb"), "a\tb");
    }

    #[test]
    fn strip_clean_borrows() {
        assert!(matches!(strip_control_chars("clean"), Cow::Borrowed(_)));
    }
}
