//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place state changes. It takes one [`Event`],
//! mutates [`AppState`] and returns whether a re-render is needed together with
//! the [`Action`]s the plugin shim must carry out.
//!
//! # Operation chains
//!
//! Every operation that touches the server ends with a list fetch:
//!
//! ```text
//! Refresh         ── list ──────────────────────────▶ replace store ─▶ render
//! SubmitForm      ── create ─▶ (ok | err) ── list ──▶ replace store ─▶ render
//! DeleteSelected  ── delete ─▶ (ok | err) ── list ──▶ replace store ─▶ render
//! ```
//!
//! A failed create or delete is reported on the status line and the chain still
//! refreshes. A failed list leaves the store as it was.
//!
//! # Example
//!
//! ```rust
//! use eventboard::api::EventsApi;
//! use eventboard::app::{handle_event, Action, AppState, Event};
//! use eventboard::ui::Theme;
//!
//! let mut state = AppState::new(EventsApi::new("https://api.test/events/"), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Refresh)?;
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::Send(_)]));
//! # Ok::<(), eventboard::EventboardError>(())
//! ```

use super::modes::{InputMode, StatusMessage};
use crate::api::{ApiResponse, EventsApi, RequestContext, RequestKind};
use crate::app::{Action, AppState};
use crate::domain::error::{EventboardError, Result};

/// Events triggered by user input, host permission results, or HTTP responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection cursor down by one position (wraps to top).
    KeyDown,
    /// Moves selection cursor up by one position (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,
    /// Re-fetches the event list.
    Refresh,
    /// Deletes the highlighted event on the server.
    DeleteSelected,
    /// Opens the new-event form.
    OpenForm,
    /// Returns to the list. The form keeps what was typed.
    CancelForm,
    /// Focuses the next form field.
    NextField,
    /// Focuses the previous form field.
    PrevField,
    /// Appends a character to the focused form field.
    Char(char),
    /// Removes the last character of the focused form field.
    Backspace,
    /// Submits the form as a new event.
    SubmitForm,
    /// Clears the status line.
    DismissStatus,

    /// Outcome of the startup permission request.
    ///
    /// The initial list fetch starts once web access is granted.
    PermissionsResult {
        granted: bool,
    },

    /// The host finished one of our HTTP requests.
    Response(ApiResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns `(should_render, actions)`.
///
/// # Errors
///
/// Returns an error only if a create request body cannot be encoded. Request
/// failures reported by the server or the host are not errors here: they are
/// logged, shown on the status line, and followed by a refresh.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Refresh => Ok((true, vec![start_refresh(state)])),
        Event::DeleteSelected => Ok(start_delete(state)),
        Event::OpenForm => {
            tracing::debug!("opening event form");
            state.input_mode = InputMode::Compose;
            Ok((true, vec![]))
        }
        Event::CancelForm => {
            state.input_mode = InputMode::Browse;
            Ok((true, vec![]))
        }
        Event::NextField => {
            if state.input_mode != InputMode::Compose {
                return Ok((false, vec![]));
            }
            state.form.focus_next();
            Ok((true, vec![]))
        }
        Event::PrevField => {
            if state.input_mode != InputMode::Compose {
                return Ok((false, vec![]));
            }
            state.form.focus_prev();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Compose {
                return Ok((false, vec![]));
            }
            state.form.push_char(*c);
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Compose {
                return Ok((false, vec![]));
            }
            state.form.backspace();
            Ok((true, vec![]))
        }
        Event::SubmitForm => start_create(state),
        Event::DismissStatus => {
            let had_status = state.status.take().is_some();
            Ok((had_status, vec![]))
        }
        Event::PermissionsResult { granted } => {
            if *granted {
                tracing::info!("web access granted, loading events");
                Ok((true, vec![start_refresh(state)]))
            } else {
                tracing::error!("web access denied, events cannot be loaded");
                state.status = Some(StatusMessage::error(
                    "Web access permission denied; events cannot be loaded",
                ));
                Ok((true, vec![]))
            }
        }
        Event::Response(response) => Ok(handle_response(state, response)),
    }
}

/// Event variant name without payload, for span fields.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::CloseFocus => "CloseFocus",
        Event::Refresh => "Refresh",
        Event::DeleteSelected => "DeleteSelected",
        Event::OpenForm => "OpenForm",
        Event::CancelForm => "CancelForm",
        Event::NextField => "NextField",
        Event::PrevField => "PrevField",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::SubmitForm => "SubmitForm",
        Event::DismissStatus => "DismissStatus",
        Event::PermissionsResult { .. } => "PermissionsResult",
        Event::Response(_) => "Response",
    }
}

/// Starts a refresh-only chain.
fn start_refresh(state: &mut AppState) -> Action {
    let request_id = state.pending.begin(RequestKind::List, None);
    let context = RequestContext::new(request_id, RequestKind::List);
    Action::Send(state.api.list_request(context))
}

fn start_delete(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.input_mode != InputMode::Browse {
        return (false, vec![]);
    }

    let Some(event) = state.selected_event() else {
        tracing::debug!("no event selected to delete");
        return (false, vec![]);
    };

    let Some(event_id) = event.id.clone() else {
        tracing::warn!(name = %event.name, "selected event has no id");
        state.status = Some(StatusMessage::error("This event has no id and cannot be deleted"));
        return (true, vec![]);
    };

    tracing::info!(event_id = %event_id, name = %event.name, "deleting event");

    let request_id = state.pending.begin(RequestKind::Delete, Some(event_id.clone()));
    let context = RequestContext::new(request_id, RequestKind::Delete).with_event_id(event_id.clone());
    let request = state.api.delete_request(&event_id, context);

    (true, vec![Action::Send(request)])
}

fn start_create(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    if state.input_mode != InputMode::Compose {
        return Ok((false, vec![]));
    }

    let draft = match state.form.to_draft() {
        Ok(draft) => draft,
        Err(EventboardError::InvalidDate(input)) => {
            tracing::warn!(input = %input, "form date rejected, no request sent");
            state.form.focus = super::form::FormField::Date;
            state.status = Some(StatusMessage::error(format!(
                "Invalid date {input:?}: use YYYY-MM-DD or YYYY-MM-DDTHH:MM"
            )));
            return Ok((true, vec![]));
        }
        Err(other) => return Err(other),
    };

    tracing::info!(name = %draft.name, "creating event");

    let request_id = state.pending.begin(RequestKind::Create, None);
    let context = RequestContext::new(request_id, RequestKind::Create);
    let request = state.api.create_request(&draft, context)?;

    state.form_submission = Some(request_id);
    state.input_mode = InputMode::Browse;

    Ok((true, vec![Action::Send(request)]))
}

fn handle_response(state: &mut AppState, response: &ApiResponse) -> (bool, Vec<Action>) {
    let context = &response.context;
    let _span = tracing::debug_span!(
        "handle_response",
        request_id = context.request_id,
        kind = context.kind.as_str(),
        status = response.status
    )
    .entered();

    match context.kind {
        RequestKind::List => {
            apply_list(state, response);
            (true, vec![])
        }
        RequestKind::Create | RequestKind::Delete => {
            record_mutation(state, response);
            (true, vec![follow_up_refresh(state, context)])
        }
    }
}

/// Final step of every chain: install the list or keep the old one.
fn apply_list(state: &mut AppState, response: &ApiResponse) {
    let request_id = response.context.request_id;

    match EventsApi::decode_list(response) {
        Ok(events) => {
            tracing::info!(request_id, count = events.len(), "event list refreshed");
            state.replace_events(events);
        }
        Err(error) => {
            tracing::error!(request_id, error = %error, "failed to fetch events");
            let reason = error.status_text();
            let text = match state.pending.get(request_id).and_then(|op| op.mutation_error.as_deref()) {
                Some(mutation_error) => format!("{mutation_error}; could not load events: {reason}"),
                None => format!("Could not load events: {reason}"),
            };
            state.status = Some(StatusMessage::error(text));
        }
    }

    state.pending.finish(request_id);
}

/// Reports the create/delete outcome. The store is not touched.
fn record_mutation(state: &mut AppState, response: &ApiResponse) {
    let context = &response.context;
    let request_id = context.request_id;

    match (context.kind, EventsApi::decode_mutation(response)) {
        (RequestKind::Create, Ok(())) => {
            tracing::info!(request_id, "event created");
            if state.form_submission == Some(request_id) {
                state.form.clear();
                state.form_submission = None;
            }
            state.status = Some(StatusMessage::info("Event created"));
        }
        (RequestKind::Delete, Ok(())) => {
            let event_id = context.event_id.as_ref().map(ToString::to_string).unwrap_or_default();
            tracing::info!(request_id, event_id = %event_id, "event deleted");
            state.status = Some(StatusMessage::info(format!("Deleted event {event_id}")));
        }
        (kind, Err(error)) => {
            tracing::error!(request_id, kind = kind.as_str(), error = %error, "request failed");
            if kind == RequestKind::Create && state.form_submission == Some(request_id) {
                state.form_submission = None;
            }
            let verb = if kind == RequestKind::Create { "create" } else { "delete" };
            let text = format!("Could not {verb} event: {}", error.status_text());
            state.pending.record_failure(request_id, text.clone());
            state.status = Some(StatusMessage::error(text));
        }
        (RequestKind::List, Ok(())) => {}
    }
}

/// Second request of a create/delete chain.
fn follow_up_refresh(state: &mut AppState, context: &RequestContext) -> Action {
    if !state.pending.advance(context.request_id) {
        tracing::warn!(request_id = context.request_id, "response for an unknown chain, refreshing anyway");
    }
    Action::Send(state.api.list_request(context.follow_up(RequestKind::List)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiRequest, HttpMethod};
    use crate::app::form::FormField;
    use crate::app::pending::Phase;
    use crate::ui::Theme;

    fn state() -> AppState {
        AppState::new(EventsApi::new("https://api.test/events/"), Theme::default())
    }

    fn sent(actions: &[Action]) -> &ApiRequest {
        match actions {
            [Action::Send(request)] => request,
            other => panic!("expected one Send action, got {other:?}"),
        }
    }

    fn reply(request: &ApiRequest, status: u16, body: &str) -> Event {
        Event::Response(ApiResponse {
            status,
            body: body.as_bytes().to_vec(),
            context: request.context.clone(),
        })
    }

    const TWO_EVENTS: &str = r#"{"data":[
        {"id":1,"name":"A","description":"","date":"2024-05-01T00:00:00.000Z","location":""},
        {"id":2,"name":"B","description":"","date":"2024-05-02T00:00:00.000Z","location":""}
    ]}"#;

    #[test]
    fn permission_grant_starts_initial_load() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        assert!(render);
        let request = sent(&actions);
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.context.kind, RequestKind::List);
        assert!(!state.pending.is_idle());
    }

    #[test]
    fn permission_denied_is_reported() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();
        assert!(actions.is_empty());
        assert!(state.status.as_ref().is_some_and(StatusMessage::is_error));
    }

    #[test]
    fn list_response_replaces_store_and_finishes_chain() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        let request = sent(&actions).clone();

        let (render, follow) = handle_event(&mut state, &reply(&request, 200, TWO_EVENTS)).unwrap();
        assert!(render);
        assert!(follow.is_empty());
        assert_eq!(state.store.len(), 2);
        assert!(state.pending.is_idle());
    }

    #[test]
    fn failed_list_keeps_previous_events() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        let first = sent(&actions).clone();
        handle_event(&mut state, &reply(&first, 200, TWO_EVENTS)).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        let second = sent(&actions).clone();
        handle_event(&mut state, &reply(&second, 503, "service unavailable")).unwrap();

        assert_eq!(state.store.len(), 2);
        assert_eq!(state.store.generation(), 1);
        assert!(state.status.as_ref().is_some_and(StatusMessage::is_error));
        assert!(state.pending.is_idle());
    }

    #[test]
    fn delete_targets_selected_event_then_refreshes() {
        let mut state = state();
        state.replace_events(EventsApi::decode_list(&ApiResponse {
            status: 200,
            body: TWO_EVENTS.as_bytes().to_vec(),
            context: RequestContext::new(0, RequestKind::List),
        }).unwrap());
        state.selected_index = 1;

        let (_, actions) = handle_event(&mut state, &Event::DeleteSelected).unwrap();
        let delete = sent(&actions).clone();
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.url, "https://api.test/events/2");
        assert_eq!(state.pending.get(delete.context.request_id).map(|op| op.phase), Some(Phase::Mutating));

        let (_, actions) = handle_event(&mut state, &reply(&delete, 204, "")).unwrap();
        let refresh = sent(&actions);
        assert_eq!(refresh.method, HttpMethod::Get);
        assert_eq!(refresh.context.request_id, delete.context.request_id);
        assert_eq!(state.pending.get(delete.context.request_id).map(|op| op.phase), Some(Phase::Refreshing));
        assert_eq!(state.store.len(), 2, "store is only changed by the list response");
    }

    #[test]
    fn delete_with_nothing_selected_does_nothing() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::DeleteSelected).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn invalid_date_sends_nothing_and_focuses_date() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenForm).unwrap();
        for c in "soon".chars() {
            state.form.focus = FormField::Date;
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        state.form.focus = FormField::Title;

        let (render, actions) = handle_event(&mut state, &Event::SubmitForm).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.form.focus, FormField::Date);
        assert_eq!(state.input_mode, InputMode::Compose);
        assert!(state.pending.is_idle());
    }

    #[test]
    fn failed_create_keeps_form_and_still_refreshes() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenForm).unwrap();
        state.form.date = "2024-05-01".to_string();

        let (_, actions) = handle_event(&mut state, &Event::SubmitForm).unwrap();
        let create = sent(&actions).clone();
        assert_eq!(create.method, HttpMethod::Post);

        let (_, actions) = handle_event(&mut state, &reply(&create, 400, r#"{"error":{"message":"Invalid name"}}"#)).unwrap();
        assert_eq!(sent(&actions).method, HttpMethod::Get);
        assert_eq!(state.form.date, "2024-05-01");
        assert_eq!(
            state.status.as_ref().map(|s| s.text.as_str()),
            Some("Could not create event: Invalid name")
        );
    }

    #[test]
    fn failed_refresh_after_failed_create_keeps_both_errors() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenForm).unwrap();
        state.form.date = "2024-05-01".to_string();

        let (_, actions) = handle_event(&mut state, &Event::SubmitForm).unwrap();
        let create = sent(&actions).clone();
        let (_, actions) = handle_event(&mut state, &reply(&create, 400, r#"{"error":{"message":"Invalid name"}}"#)).unwrap();
        let refresh = sent(&actions).clone();
        handle_event(&mut state, &reply(&refresh, 502, "bad gateway")).unwrap();

        let status = state.status.as_ref().unwrap();
        assert!(status.is_error());
        assert!(status.text.starts_with("Could not create event: Invalid name; could not load events:"));
        assert!(status.text.contains("bad gateway"));
        assert!(state.pending.is_idle());
    }

    #[test]
    fn list_with_null_fields_and_odd_dates_is_kept_whole() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        let request = sent(&actions).clone();

        let body = r#"{"data":[
            {"id":1,"name":"A","description":"","date":"2024-05-01T00:00:00.000Z","location":"Hall"},
            {"id":2,"name":"B","description":null,"date":"someday","location":null}
        ]}"#;
        handle_event(&mut state, &reply(&request, 200, body)).unwrap();

        assert_eq!(state.store.len(), 2);
        assert!(state.status.is_none());
        let second = state.store.get(1).unwrap();
        assert_eq!(second.description, "");
        assert_eq!(second.display_date(), "someday");
    }

    #[test]
    fn successful_create_clears_form() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenForm).unwrap();
        state.form.title = "Launch".to_string();
        state.form.date = "2024-05-01".to_string();

        let (_, actions) = handle_event(&mut state, &Event::SubmitForm).unwrap();
        let create = sent(&actions).clone();
        assert_eq!(state.input_mode, InputMode::Browse);

        handle_event(&mut state, &reply(&create, 201, "{}")).unwrap();
        assert!(state.form.title.is_empty());
        assert!(state.form_submission.is_none());
    }

    #[test]
    fn typing_outside_compose_is_ignored() {
        let mut state = state();
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(state.form.title.is_empty());
    }

    #[test]
    fn cancel_keeps_typed_text() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenForm).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();
        handle_event(&mut state, &Event::CancelForm).unwrap();
        assert_eq!(state.input_mode, InputMode::Browse);
        assert_eq!(state.form.title, "x");
    }

    #[test]
    fn dismiss_status_renders_only_when_something_changed() {
        let mut state = state();
        assert!(!handle_event(&mut state, &Event::DismissStatus).unwrap().0);
        state.status = Some(StatusMessage::info("Event created"));
        assert!(handle_event(&mut state, &Event::DismissStatus).unwrap().0);
        assert!(state.status.is_none());
    }
}
