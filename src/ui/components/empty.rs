//! Empty state component renderer.
//!
//! Shown in place of the event list when the store holds no events, either
//! because nothing has loaded yet or because the collection is empty.

use crate::ui::helpers::{position_cursor, push_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the two-line centered message starting at `row`.
///
/// ```text
/// [blank]
/// [padding] MESSAGE [padding]
/// [padding] subtitle [padding]
/// ```
///
/// Returns the next free row.
pub fn render_empty_state(out: &mut String, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row + 1, 1);
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    push_centered(out, &empty.message, cols);
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, 1);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    push_centered(out, &empty.subtitle, cols);
    out.push_str(Theme::reset());

    row + 3
}
