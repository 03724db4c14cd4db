//! Shared rendering utilities.
//!
//! Components write into a `String` frame instead of stdout so that a frame can
//! be compared in tests and printed in one go by the renderer. Widths are
//! counted in `char`s, never bytes, so multi-byte names do not split.

use std::fmt::Write;

/// Appends the ANSI cursor move `\u{1b}[{row};{col}H` (1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Appends `count` spaces.
pub fn pad(out: &mut String, count: usize) {
    out.extend(std::iter::repeat(' ').take(count));
}

/// Number of terminal cells `text` is assumed to occupy.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `width` chars, ending in `…` when cut.
///
/// # Example
///
/// ```rust
/// use eventboard::ui::helpers::truncate;
///
/// assert_eq!(truncate("Rust meetup", 20), "Rust meetup");
/// assert_eq!(truncate("Rust meetup", 6), "Rust …");
/// assert_eq!(truncate("Café crème", 5), "Café…");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Appends `text` truncated and then padded to exactly `width` cells.
pub fn push_column(out: &mut String, text: &str, width: usize) {
    let text = truncate(text, width);
    let used = display_width(&text);
    out.push_str(&text);
    pad(out, width - used);
}

/// Appends `text` centered in `cols` cells, padding both sides.
pub fn push_centered(out: &mut String, text: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = display_width(&text);
    let left = (cols - len) / 2;
    pad(out, left);
    out.push_str(&text);
    pad(out, cols - left - len);
}

/// Removes ANSI escape sequences, leaving what the terminal would show.
#[cfg(test)]
pub(crate) fn strip_ansi(text: &str) -> String {
    let mut visible = String::with_capacity(text.len());
    let mut in_escape = false;
    for c in text.chars() {
        if in_escape {
            in_escape = !c.is_ascii_alphabetic();
        } else if c == '\u{1b}' {
            in_escape = true;
        } else {
            visible.push(c);
        }
    }
    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("日本語テキスト", 4), "日本語…");
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(truncate("abc", 3), "abc");
    }

    #[test]
    fn column_is_exact_width() {
        let mut out = String::new();
        push_column(&mut out, "Hall A", 10);
        assert_eq!(out, "Hall A    ");

        out.clear();
        push_column(&mut out, "Grand Ballroom East", 10);
        assert_eq!(display_width(&out), 10);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn centered_fills_line() {
        let mut out = String::new();
        push_centered(&mut out, "hi", 7);
        assert_eq!(out, "  hi   ");
    }

    #[test]
    fn cursor_sequence() {
        let mut out = String::new();
        position_cursor(&mut out, 5, 1);
        assert_eq!(out, "\u{1b}[5;1H");
    }
}
