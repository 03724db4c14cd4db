//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host. It returns a `Vec<Action>` and the
//! plugin shim in `main.rs` carries each one out in order: HTTP requests go to
//! `web_request`, focus changes go to the pane API.

use crate::api::ApiRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly requests to exit the plugin (pressing 'q').
    CloseFocus,

    /// Hands a request to the host's HTTP client.
    ///
    /// The answer arrives later as a `WebRequestResult` carrying the request's
    /// context map.
    Send(ApiRequest),
}
