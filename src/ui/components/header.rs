//! Header component renderer.

use crate::ui::helpers::{display_width, pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

const SYNC_INDICATOR: &str = " ⟳ syncing";

/// Renders the centered title bar, with a sync indicator while requests are
/// in flight. Returns the next free row.
///
/// ```text
/// [padding] Events (3)  ⟳ syncing [padding]
/// ```
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let indicator = if header.syncing { SYNC_INDICATOR } else { "" };
    let title = truncate(&header.title, cols.saturating_sub(display_width(indicator)));
    let content_len = display_width(&title) + display_width(indicator);
    let padding = cols.saturating_sub(content_len) / 2;

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    pad(out, padding);
    out.push_str(&title);
    if header.syncing {
        out.push_str(&Theme::fg(&theme.colors.sync_fg));
        out.push_str(indicator);
    }
    pad(out, cols.saturating_sub(padding + content_len));

    out.push_str(Theme::reset());
    row + 1
}
