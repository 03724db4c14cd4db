//! Event list component renderer.
//!
//! Renders events as a table with NAME, DATE, LOCATION and DESCRIPTION columns.
//! The selected row is marked with `▸` and drawn in the selection colors; it is
//! the row `d` deletes. Events without an id cannot be deleted and are dimmed.

use crate::app::state::MARKER_WIDTH;
use crate::ui::helpers::{display_width, pad, position_cursor, push_column, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnLayout, DisplayItem};

/// Renders the column headers at `row`. Returns the next free row.
pub fn render_list_headers(
    out: &mut String,
    row: usize,
    columns: &ColumnLayout,
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));

    let mut line = String::new();
    pad(&mut line, MARKER_WIDTH);
    push_column(&mut line, "NAME", columns.name);
    push_column(&mut line, "DATE", columns.date);
    push_column(&mut line, "LOCATION", columns.location);
    line.push_str(&truncate("DESCRIPTION", columns.description));

    let line = truncate(&line, cols);
    out.push_str(&line);
    pad(out, cols.saturating_sub(display_width(&line)));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders one line per item starting at `row`. Returns the next free row.
pub fn render_list_rows(
    out: &mut String,
    row: usize,
    items: &[DisplayItem],
    columns: &ColumnLayout,
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_list_row(out, current_row, item, columns, theme, cols);
    }
    current_row
}

fn render_list_row(
    out: &mut String,
    row: usize,
    item: &DisplayItem,
    columns: &ColumnLayout,
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(out, row, 1);

    if item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.selection_fg));
        out.push_str(&Theme::bg(&theme.colors.selection_bg));
    } else if item.can_delete {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
    }

    let mut line = String::new();
    line.push_str(if item.is_selected { "▸ " } else { "  " });
    push_column(&mut line, &item.name, columns.name);
    push_column(&mut line, &item.date, columns.date);
    push_column(&mut line, &item.location, columns.location);
    line.push_str(&item.description);

    // Full-width line so the selection background spans the pane.
    let line = truncate(&line, cols);
    out.push_str(&line);
    pad(out, cols.saturating_sub(display_width(&line)));

    out.push_str(Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    const WIDE: ColumnLayout = ColumnLayout {
        name: 28,
        date: 22,
        location: 20,
        description: 28,
    };

    fn item(name: &str, selected: bool) -> DisplayItem {
        DisplayItem {
            name: name.to_string(),
            date: "2024-05-01 00:00 UTC".to_string(),
            location: "Hall A".to_string(),
            description: "Intro".to_string(),
            is_selected: selected,
            can_delete: true,
        }
    }

    #[test]
    fn selected_row_is_marked() {
        let theme = Theme::default();
        let mut out = String::new();
        let next = render_list_rows(&mut out, 5, &[item("A", false), item("B", true)], &WIDE, &theme, 100);

        assert_eq!(next, 7);
        assert!(out.contains("▸ B"));
        assert!(out.contains("  A"));
        assert!(out.contains(&Theme::bg(&theme.colors.selection_bg)));
    }

    #[test]
    fn row_never_exceeds_pane_width() {
        let theme = Theme::default();
        let mut out = String::new();
        let long = DisplayItem {
            description: "x".repeat(500),
            ..item("A", false)
        };
        let narrow = ColumnLayout {
            name: 13,
            date: 22,
            location: 9,
            description: 14,
        };
        render_list_row(&mut out, 1, &long, &narrow, &theme, 60);

        let visible = strip_ansi(&out).chars().count();
        assert_eq!(visible, 60);
        assert!(out.contains('…'));
    }

    #[test]
    fn narrow_columns_keep_every_field_on_screen() {
        let theme = Theme::default();
        let narrow = ColumnLayout {
            name: 13,
            date: 22,
            location: 9,
            description: 14,
        };
        let mut out = String::new();
        render_list_row(&mut out, 1, &item("Meetup", false), &narrow, &theme, 60);

        let visible = strip_ansi(&out);
        assert!(visible.contains("Meetup"));
        assert!(visible.contains("2024-05-01 00:00 UTC"));
        assert!(visible.contains("Hall A"));
        assert!(visible.contains("Intro"));
    }
}
