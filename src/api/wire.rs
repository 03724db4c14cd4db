//! JSON envelopes exchanged with the events API.
//!
//! ```json
//! { "data": [ { "id": 1, "name": "...", "date": "...", ... } ] }
//! { "error": { "message": "Invalid name" } }
//! ```

use crate::domain::EventRecord;
use serde::Deserialize;

/// Body of a successful list response.
#[derive(Debug, Deserialize)]
pub struct ListEnvelope {
    pub data: Vec<EventRecord>,
}

/// Body of a failed request.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

/// Structured error reported by the API.
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}
