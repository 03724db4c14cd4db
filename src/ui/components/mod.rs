//! Composable UI component renderers.
//!
//! Each component writes one part of the screen into the frame buffer at a
//! given row and returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar with event count and sync indicator
//! - [`form`]: New-event form box
//! - [`event_list`]: Event table (NAME, DATE, LOCATION, DESCRIPTION)
//! - [`empty`]: Message shown when there are no events
//! - [`status`]: Outcome of the last operation
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Form - 6 lines, compose mode only]
//! [List headers + rows | Empty state]
//! [Blank padding to fill screen]
//! [Status - when present]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod event_list;
mod footer;
mod form;
mod header;
mod status;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use event_list::{render_list_headers, render_list_rows};
use footer::render_footer;
use form::render_form;
use header::render_header;
use status::render_status;

/// Renders a horizontal separator at `row`. Returns the next free row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the full screen for `vm` into `out`.
///
/// The bottom block (status, border, footer) is anchored to the last rows of
/// the pane; the list never reaches it because the view model was windowed for
/// the same `rows`.
pub fn render_layout(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);

    if let Some(form) = &vm.form {
        current_row = render_form(out, current_row, form, theme, cols);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(out, current_row, empty, theme, cols);
    } else {
        current_row = render_list_headers(out, current_row, &vm.columns, theme, cols);
        render_list_rows(out, current_row, &vm.display_items, &vm.columns, theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);

    if let Some(status) = &vm.status {
        render_status(out, border_row.saturating_sub(1), status, theme, cols);
    }
    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, footer_row, &vm.footer, theme, cols);
}
