//! Holder for the fetched event collection.
//!
//! [`EventStore`] is the only place the event list lives. It is read by the view
//! model and written in exactly one way: [`EventStore::replace`] with the full
//! result of a successful list fetch. Create and delete never touch it directly;
//! they trigger a fresh fetch instead.

use crate::domain::EventRecord;

/// Verbatim copy of the last successful list fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStore {
    events: Vec<EventRecord>,
    generation: u64,
}

impl EventStore {
    /// Creates an empty store that has never been loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events in the order the API returned them.
    #[must_use]
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&EventRecord> {
        self.events.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of successful replacements so far. Zero means never loaded.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces the whole collection with a fresh fetch result.
    pub fn replace(&mut self, events: Vec<EventRecord>) {
        tracing::debug!(
            previous = self.events.len(),
            current = events.len(),
            generation = self.generation + 1,
            "event store replaced"
        );
        self.events = events;
        self.generation += 1;
    }
}
