//! Events API client.
//!
//! [`EventsApi`] translates the three logical operations (list, create, delete)
//! into [`ApiRequest`] values and decodes the matching [`ApiResponse`]s into typed
//! results. It performs no I/O: the plugin shim hands requests to the Zellij host
//! and feeds the host's answers back as responses. Keeping the client pure makes
//! every decode path testable without a network.

use crate::api::context::RequestContext;
use crate::api::wire::{ErrorEnvelope, ListEnvelope};
use crate::domain::error::{EventboardError, Result};
use crate::domain::{EventDate, EventDraft, EventId, EventRecord};
use std::collections::BTreeMap;

/// Longest slice of a non-JSON failure body kept in an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP methods used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

/// A request ready to be handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub context: RequestContext,
}

/// A response delivered by the host.
///
/// Network failures reach the plugin as responses too: the host reports them
/// with an error status and a plain-text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub context: RequestContext,
}

impl ApiResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Client for one events collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsApi {
    base_url: String,
}

impl EventsApi {
    /// Creates a client for the collection at `base_url`.
    ///
    /// A trailing `/` is appended when missing so item URLs are `<base><id>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventboard::api::EventsApi;
    ///
    /// let api = EventsApi::new("https://example.test/api/demo/events");
    /// assert_eq!(api.base_url(), "https://example.test/api/demo/events/");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into().trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    /// The collection URL, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `GET <base>`.
    #[must_use]
    pub fn list_request(&self, context: RequestContext) -> ApiRequest {
        tracing::debug!(url = %self.base_url, request_id = context.request_id, "building list request");
        ApiRequest {
            method: HttpMethod::Get,
            url: self.base_url.clone(),
            headers: BTreeMap::new(),
            body: Vec::new(),
            context,
        }
    }

    /// Builds `POST <base>` with the draft as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`EventboardError::Decode`] if the draft cannot be serialized,
    /// which does not happen for well-formed drafts.
    pub fn create_request(&self, draft: &EventDraft, context: RequestContext) -> Result<ApiRequest> {
        let body = serde_json::to_vec(draft)
            .map_err(|e| EventboardError::Decode(format!("failed to encode event: {e}")))?;

        tracing::debug!(
            url = %self.base_url,
            request_id = context.request_id,
            body_len = body.len(),
            "building create request"
        );

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        Ok(ApiRequest {
            method: HttpMethod::Post,
            url: self.base_url.clone(),
            headers,
            body,
            context,
        })
    }

    /// Builds `DELETE <base><id>`.
    #[must_use]
    pub fn delete_request(&self, id: &EventId, context: RequestContext) -> ApiRequest {
        let url = format!("{}{}", self.base_url, encode_path_segment(id.as_str()));
        tracing::debug!(url = %url, request_id = context.request_id, "building delete request");
        ApiRequest {
            method: HttpMethod::Delete,
            url,
            headers: BTreeMap::new(),
            body: Vec::new(),
            context,
        }
    }

    /// Decodes a list response into the ordered event sequence.
    ///
    /// # Errors
    ///
    /// - [`EventboardError::Api`] / [`EventboardError::Transport`] for a failure status
    /// - [`EventboardError::Decode`] for a 2xx body without a valid `data` array
    pub fn decode_list(response: &ApiResponse) -> Result<Vec<EventRecord>> {
        if !response.is_success() {
            return Err(failure_error(response));
        }

        let envelope: ListEnvelope = serde_json::from_slice(&response.body)
            .map_err(|e| EventboardError::Decode(format!("unexpected list body: {e}")))?;

        for event in &envelope.data {
            if let EventDate::Unparsed(raw) = &event.date {
                tracing::warn!(id = ?event.id, date = %raw, "event date is not RFC 3339, showing it as sent");
            }
        }

        tracing::debug!(count = envelope.data.len(), "decoded event list");
        Ok(envelope.data)
    }

    /// Decodes a create or delete response. Success bodies are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EventboardError::Api`] with the server's message, or
    /// [`EventboardError::Transport`] when the failure body is not the structured
    /// error envelope.
    pub fn decode_mutation(response: &ApiResponse) -> Result<()> {
        if response.is_success() {
            Ok(())
        } else {
            Err(failure_error(response))
        }
    }
}

/// Maps a non-2xx response to the most specific error available.
fn failure_error(response: &ApiResponse) -> EventboardError {
    if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(&response.body) {
        return EventboardError::Api {
            status: response.status,
            message: envelope.error.message,
        };
    }

    let text = String::from_utf8_lossy(&response.body);
    let text = text.trim();
    if text.is_empty() {
        EventboardError::Transport(format!("HTTP {} with empty body", response.status))
    } else {
        let excerpt: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
        EventboardError::Transport(format!("HTTP {}: {excerpt}", response.status))
    }
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::context::RequestKind;

    const BASE: &str = "https://api.test/api/demo/events/";

    fn ctx(kind: RequestKind) -> RequestContext {
        RequestContext {
            request_id: 1,
            kind,
            event_id: None,
            trace: None,
        }
    }

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status,
            body: body.as_bytes().to_vec(),
            context: ctx(RequestKind::List),
        }
    }

    #[test]
    fn requests_target_the_collection() {
        let api = EventsApi::new(BASE);

        let list = api.list_request(ctx(RequestKind::List));
        assert_eq!(list.method, HttpMethod::Get);
        assert_eq!(list.url, BASE);
        assert!(list.body.is_empty());

        let draft = EventDraft::from_input("Talk", "D", "2024-05-01", "Hall A").unwrap();
        let create = api.create_request(&draft, ctx(RequestKind::Create)).unwrap();
        assert_eq!(create.method, HttpMethod::Post);
        assert_eq!(create.url, BASE);
        assert_eq!(create.headers.get("Content-Type").map(String::as_str), Some("application/json"));
        let body: serde_json::Value = serde_json::from_slice(&create.body).unwrap();
        assert_eq!(body["date"], "2024-05-01T00:00:00.000Z");
        assert_eq!(body["name"], "Talk");

        let delete = api.delete_request(&EventId::new("42"), ctx(RequestKind::Delete));
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.url, format!("{BASE}42"));
    }

    #[test]
    fn delete_url_escapes_unsafe_ids() {
        let api = EventsApi::new(BASE);
        let delete = api.delete_request(&EventId::new("a/b c"), ctx(RequestKind::Delete));
        assert_eq!(delete.url, format!("{BASE}a%2Fb%20c"));
    }

    #[test]
    fn list_preserves_response_order() {
        let body = r#"{"data":[
            {"id":3,"name":"C","description":"","date":"2024-05-03T00:00:00.000Z","location":""},
            {"id":1,"name":"A","description":"","date":"2024-05-01T00:00:00.000Z","location":""},
            {"id":2,"name":"B","description":"","date":"2024-05-02T00:00:00.000Z","location":""}
        ]}"#;
        let events = EventsApi::decode_list(&response(200, body)).unwrap();
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["C", "A", "B"]);
    }

    #[test]
    fn list_without_data_is_a_decode_error() {
        let result = EventsApi::decode_list(&response(200, r#"{"success":true}"#));
        assert!(matches!(result, Err(EventboardError::Decode(_))));

        let result = EventsApi::decode_list(&response(200, "<html>"));
        assert!(matches!(result, Err(EventboardError::Decode(_))));
    }

    #[test]
    fn structured_failure_carries_server_message() {
        let result = EventsApi::decode_mutation(&response(400, r#"{"error":{"message":"Invalid name"}}"#));
        match result {
            Err(EventboardError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid name");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn unstructured_failure_is_transport() {
        let result = EventsApi::decode_mutation(&response(400, "error sending request: dns failure"));
        match result {
            Err(EventboardError::Transport(message)) => {
                assert_eq!(message, "HTTP 400: error sending request: dns failure");
            }
            other => panic!("expected Transport error, got {other:?}"),
        }

        let empty = EventsApi::decode_list(&response(502, ""));
        assert!(matches!(empty, Err(EventboardError::Transport(m)) if m == "HTTP 502 with empty body"));
    }

    #[test]
    fn success_body_of_mutation_is_ignored() {
        assert!(EventsApi::decode_mutation(&response(201, "not json at all")).is_ok());
        assert!(EventsApi::decode_mutation(&response(204, "")).is_ok());
    }
}
