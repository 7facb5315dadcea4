//! # Transition Records
//!
//! Every state change on a document appends a record to the document's
//! transition log, creating an ordered audit trail. Cancelled documents
//! are never deleted — the terminal state plus the log preserve the full
//! history of the transaction.

use serde::{Deserialize, Serialize};

use tradedoc_core::{PartyId, Timestamp};

/// Record of a single state transition on a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord<S> {
    /// State before the transition.
    pub from_state: S,
    /// State after the transition.
    pub to_state: S,
    /// When the transition occurred (UTC).
    pub timestamp: Timestamp,
    /// The verified party that performed the transition.
    pub actor: PartyId,
}

impl<S: Copy> TransitionRecord<S> {
    /// Record a transition performed by `actor` at the current instant.
    pub fn new(from_state: S, to_state: S, actor: PartyId) -> Self {
        Self {
            from_state,
            to_state,
            timestamp: Timestamp::now(),
            actor,
        }
    }
}
