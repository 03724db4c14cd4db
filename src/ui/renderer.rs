//! Top-level rendering coordinator.
//!
//! Rendering is two steps:
//!
//! 1. **View Model Computation**: `AppState` → `UIViewModel`
//! 2. **Component Rendering**: `UIViewModel` → ANSI frame
//!
//! The frame is built in memory and written to stdout at once. Rendering is a
//! pure function of the state and pane size, so the same state always draws
//! the same frame.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_string(state, rows, cols));
}

/// Builds the ANSI frame for `state` without printing it.
///
/// # Example
///
/// ```rust
/// use eventboard::api::EventsApi;
/// use eventboard::app::AppState;
/// use eventboard::ui::{render_to_string, Theme};
///
/// let state = AppState::new(EventsApi::new("https://api.test/events/"), Theme::default());
/// let frame = render_to_string(&state, 24, 80);
/// assert!(frame.contains("Events (0)"));
/// assert_eq!(frame, render_to_string(&state, 24, 80));
/// ```
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let _span = tracing::trace_span!("render", rows, cols, events = state.store.len()).entered();

    let viewmodel = state.compute_viewmodel(rows, cols);
    let mut frame = String::new();
    components::render_layout(&mut frame, &viewmodel, &state.theme, cols, rows);
    frame
}
