//! Status line component renderer.

use crate::ui::helpers::{display_width, pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusInfo;

/// Renders the outcome of the last operation on one line.
///
/// Errors use `error_fg` with a `✗` marker, everything else `info_fg` with `✓`.
pub fn render_status(out: &mut String, row: usize, status: &StatusInfo, theme: &Theme, cols: usize) -> usize {
    let (marker, color) = if status.is_error {
        ("✗", &theme.colors.error_fg)
    } else {
        ("✓", &theme.colors.info_fg)
    };

    let line = truncate(&format!(" {marker} {}", status.text), cols);

    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&line);
    pad(out, cols.saturating_sub(display_width(&line)));
    out.push_str(Theme::reset());
    row + 1
}
