//! New-event form component renderer.
//!
//! Draws a framed box with one line per field:
//!
//! ```text
//! [margin] ┌─ New event ────────────────────┐ [margin]
//! [margin] │ Title        Rust meetup▏      │ [margin]
//! [margin] │ Description  Monthly talks     │ [margin]
//! [margin] │ Date         YYYY-MM-DD or …   │ [margin]
//! [margin] │ Location     Hall A            │ [margin]
//! [margin] └────────────────────────────────┘ [margin]
//! ```
//!
//! The focused field's label uses `form_focus_fg` and carries the `▏` caret.
//! Empty fields show their placeholder dimmed.

use crate::ui::helpers::{display_width, pad, position_cursor, push_column, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FormFieldInfo, FormInfo};

/// Horizontal margin for the form box.
const FORM_BOX_MARGIN: usize = 2;
const LABEL_WIDTH: usize = 13;
const TITLE: &str = "─ New event ";

/// Renders the form box starting at `row`. Returns the next free row.
pub fn render_form(out: &mut String, row: usize, form: &FormInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(FORM_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let mut current_row = row;

    position_cursor(out, current_row, 1);
    pad(out, FORM_BOX_MARGIN);
    out.push_str(&Theme::fg(&theme.colors.form_border));
    let title = truncate(TITLE, inner_width);
    out.push('┌');
    out.push_str(&title);
    out.push_str(&"─".repeat(inner_width - display_width(&title)));
    out.push('┐');
    out.push_str(Theme::reset());
    current_row += 1;

    for field in &form.fields {
        render_field(out, current_row, field, theme, inner_width);
        current_row += 1;
    }

    position_cursor(out, current_row, 1);
    pad(out, FORM_BOX_MARGIN);
    out.push_str(&Theme::fg(&theme.colors.form_border));
    out.push('└');
    out.push_str(&"─".repeat(inner_width));
    out.push('┘');
    out.push_str(Theme::reset());

    current_row + 1
}

fn render_field(out: &mut String, row: usize, field: &FormFieldInfo, theme: &Theme, inner_width: usize) {
    let value_width = inner_width.saturating_sub(LABEL_WIDTH + 1);

    position_cursor(out, row, 1);
    pad(out, FORM_BOX_MARGIN);
    out.push_str(&Theme::fg(&theme.colors.form_border));
    out.push('│');

    let mut used = 0;
    if inner_width > LABEL_WIDTH {
        out.push(' ');
        if field.is_focused {
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.form_focus_fg));
        } else {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
        }
        push_column(out, &field.label, LABEL_WIDTH);
        out.push_str(Theme::reset());
        used = LABEL_WIDTH + 1;
    }

    let mut value = if field.value.is_empty() && !field.is_focused {
        out.push_str(Theme::dim());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        field.placeholder.clone()
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        field.value.clone()
    };
    if field.is_focused {
        value.push('▏');
    }

    // Long values scroll so the end (and the caret) stays visible.
    let len = display_width(&value);
    let shown: String = if len > value_width {
        value.chars().skip(len - value_width).collect()
    } else {
        value
    };
    out.push_str(&shown);
    out.push_str(Theme::reset());
    pad(out, inner_width.saturating_sub(used + display_width(&shown)));

    out.push_str(&Theme::fg(&theme.colors.form_border));
    out.push('│');
    out.push_str(Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormInfo {
        FormInfo {
            fields: vec![
                FormFieldInfo {
                    label: "Title".to_string(),
                    value: "Rust meetup".to_string(),
                    placeholder: "Event name".to_string(),
                    is_focused: true,
                },
                FormFieldInfo {
                    label: "Date".to_string(),
                    value: String::new(),
                    placeholder: "YYYY-MM-DD".to_string(),
                    is_focused: false,
                },
            ],
        }
    }

    #[test]
    fn draws_frame_and_fields() {
        let mut out = String::new();
        let next = render_form(&mut out, 4, &form(), &Theme::default(), 60);

        assert_eq!(next, 4 + 2 + 2);
        assert!(out.contains("┌─ New event "));
        assert!(out.contains("Rust meetup▏"));
        assert!(out.contains("YYYY-MM-DD"));
        assert!(out.contains('└'));
    }

    #[test]
    fn long_value_keeps_caret_visible() {
        let mut info = form();
        info.fields[0].value = "a".repeat(200);
        let mut out = String::new();
        render_form(&mut out, 1, &info, &Theme::default(), 40);
        assert!(out.contains("a▏"));
    }
}
