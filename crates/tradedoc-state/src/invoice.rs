//! # Invoice Lifecycle
//!
//! The commercial invoice is derived from an active order and shares its
//! transaction id. Exactly one invoice ever exists per id. It carries the
//! negotiated trade term once buyer and seller finalize one.
//!
//! ```text
//! Open ──cancel()──▶ Cancelled (terminal)
//!   │
//!   └── (implicit lock once a lading exists — enforced by the engine)
//! ```

use serde::{Deserialize, Serialize};

use tradedoc_core::{DocumentId, PartyId, Timestamp};
use tradedoc_terms::TradeTerm;

use crate::error::StateError;
use crate::kind::DocumentKind;
use crate::transition::TransitionRecord;

/// Lifecycle state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceState {
    /// Invoice is open; a lading may be derived from it.
    Open,
    /// Invoice was cancelled before a lading existed (terminal).
    Cancelled,
}

impl InvoiceState {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl std::fmt::Display for InvoiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => f.write_str("OPEN"),
            Self::Cancelled => f.write_str("CANCELLED"),
        }
    }
}

/// A commercial invoice record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Transaction id, shared with the order and the lading.
    pub id: DocumentId,
    /// The buyer, re-attested against the order at creation.
    pub buyer: PartyId,
    /// The seller issuing the invoice.
    pub seller: PartyId,
    /// Current lifecycle state.
    pub state: InvoiceState,
    /// The negotiated trade term, once finalized. Write-once: the
    /// negotiation record reaches `Agreed` exactly once, and only that
    /// transition writes here.
    pub trade_term: Option<TradeTerm>,
    /// When the invoice was created.
    pub created_at: Timestamp,
    /// Ordered log of state transitions.
    pub transitions: Vec<TransitionRecord<InvoiceState>>,
}

impl Invoice {
    /// Create a new open invoice with no trade term yet.
    pub fn new(id: DocumentId, buyer: PartyId, seller: PartyId) -> Self {
        Self {
            id,
            buyer,
            seller,
            state: InvoiceState::Open,
            trade_term: None,
            created_at: Timestamp::now(),
            transitions: Vec::new(),
        }
    }

    /// Cancel the invoice (OPEN → CANCELLED).
    ///
    /// The caller must already have checked that no lading exists for the
    /// id; that cross-document rule lives in the engine.
    pub fn cancel(&mut self, actor: PartyId) -> Result<(), StateError> {
        if self.state.is_terminal() {
            return Err(StateError::AlreadyCancelled {
                kind: DocumentKind::Invoice,
                id: self.id,
            });
        }
        self.do_transition(InvoiceState::Cancelled, actor);
        Ok(())
    }

    /// Validate that the invoice is open, for lading derivation.
    pub fn require_open(&self) -> Result<(), StateError> {
        match self.state {
            InvoiceState::Open => Ok(()),
            InvoiceState::Cancelled => Err(StateError::InvoiceNotOpen { id: self.id }),
        }
    }

    /// Whether the invoice is open.
    pub fn is_open(&self) -> bool {
        self.state == InvoiceState::Open
    }

    /// Record the finalized trade term on the invoice.
    ///
    /// Called exactly once, when the negotiation record transitions to
    /// `Agreed` — the negotiation machine is the write-once gate.
    pub fn record_trade_term(&mut self, term: TradeTerm) {
        self.trade_term = Some(term);
    }

    fn do_transition(&mut self, to: InvoiceState, actor: PartyId) {
        self.transitions
            .push(TransitionRecord::new(self.state, to, actor));
        self.state = to;
    }
}
