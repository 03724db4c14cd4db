//! Display-ready snapshot of the plugin pane.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They hold no
//! business logic, only display-ready strings and flags. Two computations from
//! the same state are equal, so rendering the same state twice draws the same
//! screen.
//!
//! ```text
//! AppState ──compute_viewmodel──▶ UIViewModel ──components──▶ frame
//! ```
//!
//! ```rust
//! use eventboard::ui::viewmodel::{ColumnLayout, FooterInfo, HeaderInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     display_items: vec![],
//!     selected_index: 0,
//!     header: HeaderInfo { title: " Events (0) ".to_string(), syncing: false },
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//!     columns: ColumnLayout { name: 28, date: 22, location: 20, description: 30 },
//!     empty_state: None,
//!     form: None,
//!     status: None,
//! };
//! assert!(vm.display_items.is_empty());
//! ```

/// Everything one frame needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Events inside the visible window, in store order.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected item within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,

    pub footer: FooterInfo,

    /// Event table column widths for the current pane width.
    pub columns: ColumnLayout,

    /// Shown instead of the list when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Present while the new-event form is open.
    pub form: Option<FormInfo>,

    /// Outcome of the most recent operation.
    pub status: Option<StatusInfo>,
}

/// Widths, in cells, of the event table columns after the selection marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name: usize,
    pub date: usize,
    pub location: usize,
    /// Everything right of the location column.
    pub description: usize,
}

/// One row of the event list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Event name, truncated to the name column.
    pub name: String,

    /// Date in `YYYY-MM-DD HH:MM UTC` form.
    pub date: String,

    pub location: String,

    /// Description, truncated to whatever width is left.
    pub description: String,

    pub is_selected: bool,

    /// False for records the API returned without an id.
    pub can_delete: bool,
}

/// Title bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, e.g. ` Events (3) `.
    pub title: String,

    /// Whether any request chain is still in flight.
    pub syncing: bool,
}

/// Bottom hint line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Key hints for the current input mode.
    pub keybindings: String,
}

/// Placeholder drawn where the list would be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// e.g. "No events yet".
    pub message: String,

    /// e.g. "Press n to create one".
    pub subtitle: String,
}

/// New-event form display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInfo {
    /// Fields in tab order.
    pub fields: Vec<FormFieldInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldInfo {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub is_focused: bool,
}

/// Status line display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub text: String,
    pub is_error: bool,
}
