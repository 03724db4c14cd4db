//! Footer component renderer.
//!
//! Renders the keybinding hints for the current input mode, centered and
//! dimmed, truncated on narrow panes.

use crate::ui::helpers::{position_cursor, push_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer help bar at `row`. Returns the next free row.
pub fn render_footer(out: &mut String, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    push_centered(out, &footer.keybindings, cols);
    out.push_str(Theme::reset());
    row + 1
}
