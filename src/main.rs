//! Zellij plugin wrapper and entry point.
//!
//! The thin integration layer between the Eventboard library and the Zellij
//! plugin system. The library decides *what* to do; this module does it with
//! host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Ask for `WebAccess`; the first list fetch starts once granted
//! 3. **Update**: Translate host events, delegate to `handle_event`, run actions
//! 4. **Render**: Call the library render function
//!
//! # HTTP Round-Trip
//!
//! `Action::Send` becomes a `web_request` call. The request's
//! [`RequestContext`] travels as the host context map and comes back untouched
//! with `WebRequestResult`, which is how a response finds its operation chain.
//!
//! # Keybindings
//!
//! Browse mode:
//! - `j`/`Down`/`Ctrl+n`: Move down
//! - `k`/`Up`/`Ctrl+p`: Move up
//! - `n`: New event form
//! - `d`/`Delete`: Delete selected event
//! - `r`: Reload the list
//! - `Esc`: Dismiss status message
//! - `q`: Close plugin
//!
//! Form:
//! - `Tab`/`Down`: Next field
//! - `Shift+Tab`/`Up`: Previous field
//! - `Enter`: Create the event
//! - `Esc`: Back to the list (draft is kept)

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use zellij_tile::prelude::*;

use eventboard::api::RequestContext;
use eventboard::{handle_event, Action, ApiResponse, Config, Event, HttpMethod, InputMode};

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: eventboard::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: eventboard::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes state and tracing, requests web
    /// access and subscribes to events.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        eventboard::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api = %config.api_base_url(), "parsed configuration");
        self.app = eventboard::initialize(&config);

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event, delegates to `handle_event` and executes the
    /// resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Event::PermissionsResult {
                    granted: matches!(status, PermissionStatus::Granted),
                }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        eventboard::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in &actions {
                    Self::execute_action(a);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        match self.app.input_mode {
            InputMode::Browse => Self::map_browse_key(key),
            InputMode::Compose => Self::map_compose_key(key),
        }
    }

    fn map_browse_key(key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('d') | BareKey::Delete => Event::DeleteSelected,
            BareKey::Char('n') => Event::OpenForm,
            BareKey::Char('r') => Event::Refresh,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Esc => Event::DismissStatus,
            _ => return None,
        })
    }

    fn map_compose_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PrevField,
            BareKey::Tab | BareKey::Down => Event::NextField,
            BareKey::Up => Event::PrevField,
            BareKey::Enter => Event::SubmitForm,
            BareKey::Esc => Event::CancelForm,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(_)
                if key.has_modifiers(&[KeyModifier::Ctrl])
                    || key.has_modifiers(&[KeyModifier::Alt]) =>
            {
                return None;
            }
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    /// Rebuilds the [`RequestContext`] of a finished request and re-attaches
    /// the span that issued it.
    fn map_web_result(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let context = match RequestContext::from_map(context) {
            Ok(context) => context,
            Err(e) => {
                tracing::error!(status, error = %e, "dropping web response without usable context");
                return None;
            }
        };

        if let Some(parent) = context.trace.as_ref().and_then(|t| t.to_otel_context()) {
            tracing::Span::current().set_parent(parent);
        }
        tracing::debug!(
            status,
            request_id = context.request_id,
            kind = context.kind.as_str(),
            "web response received"
        );

        Some(Event::Response(ApiResponse {
            status,
            body,
            context,
        }))
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Send(request) => {
                let verb = match request.method {
                    HttpMethod::Get => HttpVerb::Get,
                    HttpMethod::Post => HttpVerb::Post,
                    HttpMethod::Delete => HttpVerb::Delete,
                };
                tracing::debug!(
                    method = ?request.method,
                    url = %request.url,
                    request_id = request.context.request_id,
                    "sending web request"
                );
                web_request(
                    &request.url,
                    verb,
                    request.headers.clone(),
                    request.body.clone(),
                    request.context.to_map(),
                );
            }
        }
    }
}
