//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (`main.rs`) and the domain/API layers. Data
//! flows one way:
//!
//! ```text
//! Key / WebRequestResult → Event → handle_event → AppState → Actions → host
//!                                       ↑                                │
//!                                       └──────── Event::Response ◀──────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and operation chains
//! - [`modes`]: Input mode and status line types
//! - [`form`]: New-event form contents
//! - [`pending`]: In-flight request chain tracking
//! - [`store`]: The fetched event collection
//! - [`state`]: Central state container and view model computation

pub mod actions;
pub mod form;
pub mod handler;
pub mod modes;
pub mod pending;
pub mod state;
pub mod store;

pub use actions::Action;
pub use form::{EventForm, FormField};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, StatusKind, StatusMessage};
pub use pending::{PendingOperation, PendingOperations, Phase};
pub use state::AppState;
pub use store::EventStore;
