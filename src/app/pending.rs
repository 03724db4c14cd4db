//! Tracking of in-flight operation chains.
//!
//! Each user-triggered operation runs as a chain of host requests:
//!
//! ```text
//! Idle → Mutating → Refreshing → Rendering → Idle
//! ```
//!
//! A plain refresh enters at `Refreshing`. Chains are keyed by [`RequestId`] and
//! are independent: nothing orders two chains against each other, so the list
//! response that arrives last decides what is rendered.

use crate::api::{RequestId, RequestKind};
use crate::domain::EventId;
use std::collections::BTreeMap;

/// Where a chain currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The create or delete request is in flight.
    Mutating,
    /// The list request that follows (or that is the whole chain) is in flight.
    Refreshing,
}

/// One in-flight chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOperation {
    /// The request that started the chain (`List` for a plain refresh).
    pub origin: RequestKind,
    pub phase: Phase,
    /// Event targeted by a delete.
    pub event_id: Option<EventId>,
    /// Status text of a failed create/delete, kept for the rest of the chain.
    pub mutation_error: Option<String>,
}

/// All chains that have not reached `Idle` yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOperations {
    operations: BTreeMap<RequestId, PendingOperation>,
    next_id: RequestId,
}

impl Default for PendingOperations {
    fn default() -> Self {
        Self {
            operations: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl PendingOperations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new chain and returns its id.
    pub fn begin(&mut self, origin: RequestKind, event_id: Option<EventId>) -> RequestId {
        let id = self.next_id;
        self.next_id += 1;

        let phase = match origin {
            RequestKind::List => Phase::Refreshing,
            RequestKind::Create | RequestKind::Delete => Phase::Mutating,
        };

        tracing::debug!(request_id = id, origin = origin.as_str(), ?phase, "operation started");
        self.operations.insert(
            id,
            PendingOperation {
                origin,
                phase,
                event_id,
                mutation_error: None,
            },
        );
        id
    }

    /// Moves a chain from `Mutating` to `Refreshing`.
    ///
    /// Returns `false` if the chain is unknown (its mutation response arrived
    /// for a chain this state did not start).
    pub fn advance(&mut self, id: RequestId) -> bool {
        match self.operations.get_mut(&id) {
            Some(operation) => {
                operation.phase = Phase::Refreshing;
                true
            }
            None => false,
        }
    }

    /// Remembers that the mutation of chain `id` failed with `message`.
    pub fn record_failure(&mut self, id: RequestId, message: impl Into<String>) {
        if let Some(operation) = self.operations.get_mut(&id) {
            operation.mutation_error = Some(message.into());
        }
    }

    /// Removes a chain whose list response has been applied.
    pub fn finish(&mut self, id: RequestId) -> Option<PendingOperation> {
        let finished = self.operations.remove(&id);
        tracing::debug!(request_id = id, known = finished.is_some(), remaining = self.operations.len(), "operation finished");
        finished
    }

    #[must_use]
    pub fn get(&self, id: RequestId) -> Option<&PendingOperation> {
        self.operations.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_walks_through_phases() {
        let mut pending = PendingOperations::new();
        let id = pending.begin(RequestKind::Delete, Some(EventId::new("7")));

        assert_eq!(pending.get(id).map(|op| op.phase), Some(Phase::Mutating));
        assert!(pending.advance(id));
        assert_eq!(pending.get(id).map(|op| op.phase), Some(Phase::Refreshing));

        let done = pending.finish(id).unwrap();
        assert_eq!(done.event_id, Some(EventId::new("7")));
        assert!(pending.is_idle());
    }

    #[test]
    fn failure_stays_with_its_chain() {
        let mut pending = PendingOperations::new();
        let failed = pending.begin(RequestKind::Create, None);
        let other = pending.begin(RequestKind::Delete, Some(EventId::new("3")));

        pending.record_failure(failed, "Could not create event: Invalid name");
        pending.advance(failed);

        assert_eq!(
            pending.finish(failed).and_then(|op| op.mutation_error).as_deref(),
            Some("Could not create event: Invalid name")
        );
        assert_eq!(pending.get(other).and_then(|op| op.mutation_error.as_deref()), None);
    }

    #[test]
    fn refresh_starts_in_refreshing() {
        let mut pending = PendingOperations::new();
        let id = pending.begin(RequestKind::List, None);
        assert_eq!(pending.get(id).map(|op| op.phase), Some(Phase::Refreshing));
    }

    #[test]
    fn ids_are_unique_and_chains_independent() {
        let mut pending = PendingOperations::new();
        let a = pending.begin(RequestKind::Delete, Some(EventId::new("1")));
        let b = pending.begin(RequestKind::Delete, Some(EventId::new("2")));
        assert_ne!(a, b);
        assert_eq!(pending.len(), 2);

        pending.finish(b);
        assert_eq!(pending.len(), 1);
        assert!(pending.get(a).is_some());
        assert!(!pending.advance(b));
    }
}
