//! # Order Lifecycle
//!
//! The purchase order opens a transaction. It is created by the seller
//! side naming a buyer, stays `Active` until either cancelled or locked by
//! the creation of an invoice, and is never deleted.
//!
//! ```text
//! Active ──cancel()──▶ Cancelled (terminal)
//!    │
//!    └── (implicit lock once an invoice exists — enforced by the engine)
//! ```

use serde::{Deserialize, Serialize};

use tradedoc_core::{DocumentId, DocumentLink, PartyId, Timestamp};

use crate::error::StateError;
use crate::kind::DocumentKind;
use crate::transition::TransitionRecord;

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    /// Order is open for the transaction to proceed.
    Active,
    /// Order was cancelled before an invoice existed (terminal).
    Cancelled,
}

impl OrderState {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => f.write_str("ACTIVE"),
            Self::Cancelled => f.write_str("CANCELLED"),
        }
    }
}

/// A purchase order record.
///
/// Party attribution is immutable after creation: the buyer named at
/// creation and the seller that created the order never change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Transaction id, shared with the derived invoice and lading.
    pub id: DocumentId,
    /// The buyer named on the order.
    pub buyer: PartyId,
    /// The seller that initiated the order.
    pub created_by: PartyId,
    /// Buyer-facing reference number, stored verbatim.
    pub reference_number: u64,
    /// Opaque link to the externally stored order document.
    pub link: DocumentLink,
    /// Current lifecycle state.
    pub state: OrderState,
    /// When the order was created.
    pub created_at: Timestamp,
    /// Ordered log of state transitions.
    pub transitions: Vec<TransitionRecord<OrderState>>,
}

impl Order {
    /// Create a new active order.
    pub fn new(
        id: DocumentId,
        buyer: PartyId,
        created_by: PartyId,
        reference_number: u64,
        link: DocumentLink,
    ) -> Self {
        Self {
            id,
            buyer,
            created_by,
            reference_number,
            link,
            state: OrderState::Active,
            created_at: Timestamp::now(),
            transitions: Vec::new(),
        }
    }

    /// Cancel the order (ACTIVE → CANCELLED).
    ///
    /// The caller must already have checked that no invoice exists for the
    /// id; that cross-document rule lives in the engine.
    pub fn cancel(&mut self, actor: PartyId) -> Result<(), StateError> {
        if self.state.is_terminal() {
            return Err(StateError::AlreadyCancelled {
                kind: DocumentKind::Order,
                id: self.id,
            });
        }
        self.do_transition(OrderState::Cancelled, actor);
        Ok(())
    }

    /// Validate that the order is active, for invoice derivation.
    pub fn require_active(&self) -> Result<(), StateError> {
        match self.state {
            OrderState::Active => Ok(()),
            OrderState::Cancelled => Err(StateError::OrderNotActive { id: self.id }),
        }
    }

    /// Whether the order is active.
    pub fn is_active(&self) -> bool {
        self.state == OrderState::Active
    }

    fn do_transition(&mut self, to: OrderState, actor: PartyId) {
        self.transitions
            .push(TransitionRecord::new(self.state, to, actor));
        self.state = to;
    }
}
