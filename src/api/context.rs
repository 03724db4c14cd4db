//! Request correlation through the host's context map.
//!
//! Zellij delivers web responses as `WebRequestResult` events that carry back the
//! `BTreeMap<String, String>` context passed with the request. [`RequestContext`]
//! is the typed view of that map: it names the chain a response belongs to, the
//! kind of request, the targeted event, and the OpenTelemetry span that issued it.

use crate::domain::error::{EventboardError, Result};
use crate::domain::EventId;
use std::collections::BTreeMap;

const KEY_REQUEST_ID: &str = "eventboard.request_id";
const KEY_KIND: &str = "eventboard.kind";
const KEY_EVENT_ID: &str = "eventboard.event_id";
const KEY_TRACE_ID: &str = "eventboard.trace_id";
const KEY_PARENT_SPAN_ID: &str = "eventboard.parent_span_id";

/// Identifies one user-triggered chain (mutation, refresh, render).
///
/// The refresh issued after a mutation reuses the mutation's id.
pub type RequestId = u64;

/// The API operation a request performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    List,
    Create,
    Delete,
}

impl RequestKind {
    /// Wire name used in the context map.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Delete => "delete",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "list" => Some(Self::List),
            "create" => Some(Self::Create),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// Distributed tracing context carried across the host round-trip.
///
/// Captures the OpenTelemetry trace and span IDs of the span that issued a
/// request so the span handling its response can be parented to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the issuing span as a hex string.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the current
    /// span context is invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds a remote OpenTelemetry context to use as a span parent.
    ///
    /// Returns `None` if either ID is not valid hex.
    #[must_use]
    pub fn to_otel_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// Typed contents of the host context map attached to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub kind: RequestKind,
    pub event_id: Option<EventId>,
    pub trace: Option<TraceContext>,
}

impl RequestContext {
    /// Creates a context for `kind`, capturing the current trace span.
    #[must_use]
    pub fn new(request_id: RequestId, kind: RequestKind) -> Self {
        Self {
            request_id,
            kind,
            event_id: None,
            trace: TraceContext::from_current(),
        }
    }

    /// Attaches the event the request targets.
    #[must_use]
    pub fn with_event_id(mut self, event_id: EventId) -> Self {
        self.event_id = Some(event_id);
        self
    }

    /// Same chain, different request kind (used for the post-mutation refresh).
    #[must_use]
    pub fn follow_up(&self, kind: RequestKind) -> Self {
        Self {
            request_id: self.request_id,
            kind,
            event_id: self.event_id.clone(),
            trace: TraceContext::from_current().or_else(|| self.trace.clone()),
        }
    }

    /// Flattens the context into the host's string map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(KEY_REQUEST_ID.to_string(), self.request_id.to_string());
        map.insert(KEY_KIND.to_string(), self.kind.as_str().to_string());
        if let Some(event_id) = &self.event_id {
            map.insert(KEY_EVENT_ID.to_string(), event_id.to_string());
        }
        if let Some(trace) = &self.trace {
            map.insert(KEY_TRACE_ID.to_string(), trace.trace_id.clone());
            map.insert(KEY_PARENT_SPAN_ID.to_string(), trace.parent_span_id.clone());
        }
        map
    }

    /// Parses a context map returned by the host.
    ///
    /// # Errors
    ///
    /// Returns [`EventboardError::Context`] if the request id or kind is missing
    /// or malformed. The trace entries are optional.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        let request_id = map
            .get(KEY_REQUEST_ID)
            .ok_or_else(|| EventboardError::Context(format!("missing {KEY_REQUEST_ID}")))?
            .parse::<RequestId>()
            .map_err(|e| EventboardError::Context(format!("bad {KEY_REQUEST_ID}: {e}")))?;

        let kind_raw = map
            .get(KEY_KIND)
            .ok_or_else(|| EventboardError::Context(format!("missing {KEY_KIND}")))?;
        let kind = RequestKind::parse(kind_raw)
            .ok_or_else(|| EventboardError::Context(format!("unknown request kind {kind_raw:?}")))?;

        let trace = match (map.get(KEY_TRACE_ID), map.get(KEY_PARENT_SPAN_ID)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Ok(Self {
            request_id,
            kind,
            event_id: map.get(KEY_EVENT_ID).map(EventId::new),
            trace,
        })
    }
}
