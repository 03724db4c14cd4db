//! Domain layer for the Eventboard plugin.
//!
//! Core types independent of Zellij APIs and of the HTTP exchange.
//!
//! - [`error`]: Error types and result alias
//! - [`event`]: Event record, create draft, and date normalization

pub mod error;
pub mod event;

pub use error::{EventboardError, Result};
pub use event::{normalize_date, EventDate, EventDraft, EventId, EventRecord};
