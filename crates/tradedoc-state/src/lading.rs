//! # Bill of Lading Lifecycle
//!
//! The bill of lading is derived from an open invoice and shares its
//! transaction id. It is issued naming the carrier, and the carrier
//! confirms the shipment exactly once — custody of the goods passes to the
//! carrier at that instant.
//!
//! ```text
//! Issued ──confirm_shipment()──▶ ShipmentConfirmed (terminal)
//! ```

use serde::{Deserialize, Serialize};

use tradedoc_core::{DocumentId, PartyId, Timestamp};

use crate::error::StateError;
use crate::transition::TransitionRecord;

/// Lifecycle state of a bill of lading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LadingState {
    /// Lading issued; goods not yet confirmed into carrier custody.
    Issued,
    /// Carrier confirmed receipt of the goods (terminal).
    ShipmentConfirmed,
}

impl LadingState {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ShipmentConfirmed)
    }
}

impl std::fmt::Display for LadingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Issued => f.write_str("ISSUED"),
            Self::ShipmentConfirmed => f.write_str("SHIPMENT_CONFIRMED"),
        }
    }
}

/// A bill of lading record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lading {
    /// Transaction id, shared with the order and the invoice.
    pub id: DocumentId,
    /// The seller, re-attested against the invoice at creation.
    pub seller: PartyId,
    /// The carrier taking custody of the goods.
    pub carrier: PartyId,
    /// Current lifecycle state.
    pub state: LadingState,
    /// When the lading was issued.
    pub created_at: Timestamp,
    /// Ordered log of state transitions.
    pub transitions: Vec<TransitionRecord<LadingState>>,
}

impl Lading {
    /// Issue a new lading.
    pub fn new(id: DocumentId, seller: PartyId, carrier: PartyId) -> Self {
        Self {
            id,
            seller,
            carrier,
            state: LadingState::Issued,
            created_at: Timestamp::now(),
            transitions: Vec::new(),
        }
    }

    /// Confirm the shipment (ISSUED → SHIPMENT_CONFIRMED).
    ///
    /// Non-idempotent: confirming a confirmed lading is an error, so a
    /// duplicate confirmation can never pass silently.
    pub fn confirm_shipment(&mut self, actor: PartyId) -> Result<(), StateError> {
        if self.state.is_terminal() {
            return Err(StateError::AlreadyConfirmed { id: self.id });
        }
        self.do_transition(LadingState::ShipmentConfirmed, actor);
        Ok(())
    }

    /// Validate that the shipment is confirmed, for consolidated retrieval.
    pub fn require_confirmed(&self) -> Result<(), StateError> {
        match self.state {
            LadingState::ShipmentConfirmed => Ok(()),
            LadingState::Issued => Err(StateError::NotShipped { id: self.id }),
        }
    }

    /// Whether the carrier has confirmed the shipment.
    pub fn is_confirmed(&self) -> bool {
        self.state == LadingState::ShipmentConfirmed
    }

    fn do_transition(&mut self, to: LadingState, actor: PartyId) {
        self.transitions
            .push(TransitionRecord::new(self.state, to, actor));
        self.state = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lading() -> Lading {
        Lading::new(DocumentId::from_raw(1), PartyId::new(), PartyId::new())
    }

    #[test]
    fn new_lading_is_issued() {
        let lading = sample_lading();
        assert_eq!(lading.state, LadingState::Issued);
        assert!(!lading.is_confirmed());
    }

    #[test]
    fn confirm_transitions_once() {
        let mut lading = sample_lading();
        let carrier = lading.carrier;
        lading.confirm_shipment(carrier).unwrap();
        assert!(lading.is_confirmed());
        assert_eq!(lading.transitions.len(), 1);
        assert_eq!(lading.transitions[0].actor, carrier);
    }

    #[test]
    fn second_confirmation_is_rejected() {
        let mut lading = sample_lading();
        lading.confirm_shipment(lading.carrier).unwrap();
        let err = lading.confirm_shipment(lading.carrier).unwrap_err();
        assert_eq!(err, StateError::AlreadyConfirmed { id: lading.id });
        // Still exactly one transition on record.
        assert_eq!(lading.transitions.len(), 1);
    }

    #[test]
    fn unconfirmed_lading_fails_require_confirmed() {
        let lading = sample_lading();
        assert_eq!(
            lading.require_confirmed().unwrap_err(),
            StateError::NotShipped { id: lading.id }
        );
    }

    #[test]
    fn serde_roundtrip() {
        let mut lading = sample_lading();
        lading.confirm_shipment(lading.carrier).unwrap();
        let json = serde_json::to_string(&lading).unwrap();
        let parsed: Lading = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.state, LadingState::ShipmentConfirmed);
    }
}
