//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin: the fetched event
//! collection, the cursor, the form, in-flight request chains and the status
//! line. The handler mutates it; the renderer only reads it through
//! [`AppState::compute_viewmodel`].
//!
//! # State Components
//!
//! - **Store**: events from the last successful list fetch, replaced wholesale
//! - **Selection**: cursor position within the store
//! - **Input Mode**: browse the list or type into the form
//! - **Form**: contents of the new-event form, kept across Esc
//! - **Pending**: request chains that have not finished their refresh yet
//! - **Status**: outcome of the most recent operation
//!
//! # Example
//!
//! ```rust
//! use eventboard::api::EventsApi;
//! use eventboard::app::AppState;
//! use eventboard::ui::Theme;
//!
//! let state = AppState::new(EventsApi::new("https://api.test/events/"), Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.display_items.is_empty());
//! ```

use super::form::{EventForm, FormField};
use super::modes::{InputMode, StatusMessage};
use super::pending::PendingOperations;
use super::store::EventStore;
use crate::api::{EventsApi, RequestId};
use crate::domain::EventRecord;
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ColumnLayout, DisplayItem, EmptyState, FooterInfo, FormFieldInfo, FormInfo, HeaderInfo, StatusInfo, UIViewModel,
};

/// Rows taken by everything except the list: blank line, header, two borders,
/// column headers, footer and the unused last line.
const BASE_CHROME_ROWS: usize = 7;
/// Rows taken by the form box (frame plus one line per field).
const FORM_ROWS: usize = FormField::ALL.len() + 2;

/// Name and location widths once the pane is wide enough.
const NAME_COLUMN_WIDTH: usize = 28;
const LOCATION_COLUMN_WIDTH: usize = 20;
/// Fits `YYYY-MM-DD HH:MM UTC` plus a gap.
const DATE_COLUMN_WIDTH: usize = 22;
/// Description width below which name and location give up space.
const MIN_DESCRIPTION_WIDTH: usize = 24;
/// Width of the selection marker in front of each row.
pub(crate) const MARKER_WIDTH: usize = 2;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Events from the most recent successful list fetch.
    pub store: EventStore,

    /// Zero-based index into `store`. Clamped whenever the store is replaced.
    pub selected_index: usize,

    pub input_mode: InputMode,

    /// New-event form. Cleared only after a create succeeds.
    pub form: EventForm,

    /// Chain id of the create submitted from the current form contents.
    pub form_submission: Option<RequestId>,

    /// In-flight request chains.
    pub pending: PendingOperations,

    /// Outcome of the most recent operation, until dismissed or replaced.
    pub status: Option<StatusMessage>,

    /// Client for the configured events collection.
    pub api: EventsApi,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates a state with an empty, not yet loaded store.
    #[must_use]
    pub fn new(api: EventsApi, theme: Theme) -> Self {
        Self {
            store: EventStore::new(),
            selected_index: 0,
            input_mode: InputMode::Browse,
            form: EventForm::new(),
            form_submission: None,
            pending: PendingOperations::new(),
            status: None,
            api,
            theme,
        }
    }

    /// Moves selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.store.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.store.len();
    }

    /// Moves selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.store.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.store.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_event(&self) -> Option<&EventRecord> {
        self.store.get(self.selected_index)
    }

    /// Installs a fresh list fetch result and keeps the cursor in bounds.
    pub fn replace_events(&mut self, events: Vec<EventRecord>) {
        self.store.replace(events);
        if self.store.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.store.len() - 1);
        }
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    ///
    /// Pure function of the state: equal states give equal view models.
    ///
    /// # Windowing
    ///
    /// The visible window is centered on the selection and pulled back when
    /// it would run past the end of the list, so the selection is always
    /// visible and the window is full whenever the list is long enough.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let header = self.compute_header();
        let footer = self.compute_footer();
        let form = self.compute_form();
        let status = self.compute_status();

        if self.store.is_empty() {
            return UIViewModel {
                display_items: vec![],
                selected_index: 0,
                header,
                footer,
                columns: column_layout(cols),
                empty_state: Some(self.compute_empty_state()),
                form,
                status,
            };
        }

        let available_rows = self.calculate_available_rows(rows).max(1);
        let total = self.store.len();

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(total);
        if visible_end - visible_start < available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let columns = column_layout(cols);
        let display_items = self.store.events()[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, event)| {
                self.compute_display_item(event, visible_start + relative_idx, &columns)
            })
            .collect();

        UIViewModel {
            display_items,
            selected_index: self.selected_index - visible_start,
            header,
            footer,
            columns,
            empty_state: None,
            form,
            status,
        }
    }

    fn compute_display_item(&self, event: &EventRecord, absolute_idx: usize, columns: &ColumnLayout) -> DisplayItem {
        DisplayItem {
            name: truncate(&event.name, columns.name.saturating_sub(1)),
            date: truncate(&event.display_date(), columns.date.saturating_sub(1)),
            location: truncate(&event.location, columns.location.saturating_sub(1)),
            description: truncate(&event.description, columns.description),
            is_selected: absolute_idx == self.selected_index,
            can_delete: event.id.is_some(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: format!(" Events ({}) ", self.store.len()),
            syncing: !self.pending.is_idle(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Browse => {
                "j/k or Ctrl+n/p: navigate  n: new  d: delete  r: refresh  Esc: dismiss  q: quit"
            }
            InputMode::Compose => "Tab/Shift+Tab: next/prev field  Enter: create  Esc: back to list",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        let (message, subtitle) = if self.store.generation() > 0 {
            ("No events yet", "Press n to create one")
        } else if self.pending.is_idle() {
            ("Events not loaded", "Press r to try again")
        } else {
            ("Loading events…", "Waiting for the events API")
        };
        EmptyState {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        }
    }

    fn compute_form(&self) -> Option<FormInfo> {
        if self.input_mode != InputMode::Compose {
            return None;
        }
        let fields = FormField::ALL
            .iter()
            .map(|&field| FormFieldInfo {
                label: field.label().to_string(),
                value: self.form.value(field).to_string(),
                placeholder: field.placeholder().to_string(),
                is_focused: field == self.form.focus,
            })
            .collect();
        Some(FormInfo { fields })
    }

    fn compute_status(&self) -> Option<StatusInfo> {
        self.status.as_ref().map(|status| StatusInfo {
            text: status.text.clone(),
            is_error: status.is_error(),
        })
    }

    /// Rows left for list items after the chrome, the form and the status line.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        let mut chrome = BASE_CHROME_ROWS;
        if matches!(self.input_mode, InputMode::Compose) {
            chrome += FORM_ROWS;
        }
        if self.status.is_some() {
            chrome += 1;
        }
        total_rows.saturating_sub(chrome)
    }
}

/// Splits a pane `cols` wide into table columns.
///
/// Wide panes get the full name and location columns and leave the rest to
/// the description. Narrower panes split the space left of the date column
/// 3:2:3 between name, location and description, so every column stays
/// visible.
fn column_layout(cols: usize) -> ColumnLayout {
    let flexible = cols.saturating_sub(MARKER_WIDTH + DATE_COLUMN_WIDTH);

    if flexible >= NAME_COLUMN_WIDTH + LOCATION_COLUMN_WIDTH + MIN_DESCRIPTION_WIDTH {
        return ColumnLayout {
            name: NAME_COLUMN_WIDTH,
            date: DATE_COLUMN_WIDTH,
            location: LOCATION_COLUMN_WIDTH,
            description: flexible - NAME_COLUMN_WIDTH - LOCATION_COLUMN_WIDTH,
        };
    }

    let name = flexible * 3 / 8;
    let location = flexible / 4;
    ColumnLayout {
        name,
        date: DATE_COLUMN_WIDTH,
        location,
        description: flexible - name - location,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{normalize_date, EventId};

    fn record(id: Option<&str>, name: &str) -> EventRecord {
        EventRecord {
            id: id.map(EventId::new),
            name: name.to_string(),
            description: format!("about {name}"),
            date: normalize_date("2024-05-01T18:30").unwrap().into(),
            location: "Hall".to_string(),
        }
    }

    fn state_with(count: usize) -> AppState {
        let mut state = AppState::new(EventsApi::new("https://api.test/events/"), Theme::default());
        let events = (0..count)
            .map(|i| record(Some(&i.to_string()), &format!("event {i}")))
            .collect();
        state.replace_events(events);
        state
    }

    #[test]
    fn selection_wraps() {
        let mut state = state_with(3);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn selection_clamped_when_list_shrinks() {
        let mut state = state_with(5);
        state.selected_index = 4;
        state.replace_events(vec![record(Some("a"), "a"), record(Some("b"), "b")]);
        assert_eq!(state.selected_index, 1);

        state.replace_events(vec![]);
        assert_eq!(state.selected_index, 0);
        assert!(state.selected_event().is_none());
    }

    #[test]
    fn viewmodel_lists_events_in_store_order() {
        let state = state_with(3);
        let vm = state.compute_viewmodel(24, 120);

        let names: Vec<&str> = vm.display_items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["event 0", "event 1", "event 2"]);
        assert_eq!(vm.display_items[0].date, "2024-05-01 18:30 UTC");
        assert!(vm.display_items[0].is_selected);
        assert_eq!(vm.header.title, " Events (3) ");
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn columns_fit_the_pane() {
        for cols in [40, 60, 72, 80, 95, 96, 120, 200] {
            let columns = column_layout(cols);
            let used = MARKER_WIDTH + columns.name + columns.date + columns.location + columns.description;
            assert_eq!(used, cols, "cols = {cols}");
        }

        let wide = column_layout(120);
        assert_eq!((wide.name, wide.location, wide.description), (28, 20, 48));

        let narrow = column_layout(60);
        assert!(narrow.description >= 10, "{narrow:?}");
        assert!(narrow.name >= 10, "{narrow:?}");
    }

    #[test]
    fn narrow_pane_still_shows_description() {
        let mut state = state_with(0);
        let mut event = record(Some("1"), "Meetup");
        event.description = "Lightning talks".to_string();
        state.replace_events(vec![event]);

        let item = &state.compute_viewmodel(24, 60).display_items[0];
        assert!(item.description.starts_with("Lightning"), "{item:?}");
        assert_eq!(item.name, "Meetup");
    }

    #[test]
    fn window_keeps_selection_visible() {
        let mut state = state_with(50);
        state.selected_index = 49;
        let vm = state.compute_viewmodel(20, 80);

        assert_eq!(vm.display_items.len(), 20 - BASE_CHROME_ROWS);
        assert!(vm.display_items[vm.selected_index].is_selected);
        assert_eq!(vm.display_items.last().map(|i| i.name.as_str()), Some("event 49"));
    }

    #[test]
    fn empty_state_distinguishes_loading_from_empty() {
        let mut state = AppState::new(EventsApi::new("https://api.test/events/"), Theme::default());
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.unwrap().message, "Events not loaded");

        state.pending.begin(crate::api::RequestKind::List, None);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.unwrap().message, "Loading events…");
        assert!(vm.header.syncing);

        state.replace_events(vec![]);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.unwrap().message, "No events yet");
    }

    #[test]
    fn records_without_id_are_not_deletable() {
        let mut state = state_with(0);
        state.replace_events(vec![record(None, "draft")]);
        let vm = state.compute_viewmodel(24, 80);
        assert!(!vm.display_items[0].can_delete);
    }

    #[test]
    fn form_only_in_compose_mode() {
        let mut state = state_with(1);
        assert!(state.compute_viewmodel(24, 80).form.is_none());

        state.input_mode = InputMode::Compose;
        state.form.focus = FormField::Date;
        let form = state.compute_viewmodel(24, 80).form.unwrap();
        let focused: Vec<&str> = form
            .fields
            .iter()
            .filter(|f| f.is_focused)
            .map(|f| f.label.as_str())
            .collect();
        assert_eq!(focused, ["Date"]);
    }

    #[test]
    fn viewmodel_is_deterministic() {
        let mut state = state_with(10);
        state.selected_index = 6;
        state.status = Some(StatusMessage::error("Invalid name"));
        assert_eq!(state.compute_viewmodel(24, 100), state.compute_viewmodel(24, 100));
    }
}
