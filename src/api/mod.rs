//! API client layer for the remote events collection.
//!
//! The client never performs I/O itself. Requests are plain values handed to the
//! host (`web_request`), and the host's `WebRequestResult` events come back as
//! [`ApiResponse`]s:
//!
//! ```text
//! handler ── Action::Send(ApiRequest) ──▶ shim ── web_request ──▶ host
//!    ▲                                                              │
//!    └──── Event::Response(ApiResponse) ◀── shim ◀── WebRequestResult
//! ```
//!
//! - [`client`]: request construction and response decoding
//! - [`context`]: request correlation and trace propagation through the host
//! - [`wire`]: JSON envelopes of the API

pub mod client;
pub mod context;
pub mod wire;

pub use client::{ApiRequest, ApiResponse, EventsApi, HttpMethod};
pub use context::{RequestContext, RequestId, RequestKind, TraceContext};
