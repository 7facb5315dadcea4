//! # Liability Resolution
//!
//! Computes risk and cost responsibility for a shipment instant from the
//! negotiated trade term and the shipment phase. Pure derivation from the
//! term table — no mutable state, deterministic and idempotent.

use serde::{Deserialize, Serialize};

use tradedoc_core::PartyRole;

use crate::term::{TradeTerm, TransferPoint};

/// Where the goods stand relative to the carrier handoff.
///
/// Derived from the bill of lading: [`ShipmentPhase::PreHandoff`] until the
/// carrier confirms the shipment, [`ShipmentPhase::PostHandoff`] after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentPhase {
    /// Goods have not yet been confirmed into the carrier's custody.
    PreHandoff,
    /// The carrier has confirmed custody of the goods.
    PostHandoff,
}

/// Risk and cost responsibility attribution for one shipment instant.
///
/// All fields are a pure function of `(trade_term, phase)`; resolving the
/// same inputs twice yields identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liability {
    /// The negotiated rule this attribution derives from.
    pub trade_term: TradeTerm,
    /// Point at which risk of loss passes from seller to buyer.
    pub risk_transfer: TransferPoint,
    /// Point up to which the seller bears carriage cost.
    pub cost_allocation: TransferPoint,
    /// Who bears risk of loss before the carrier handoff.
    pub risk_bearer_before_handoff: PartyRole,
    /// Who bears risk of loss after the carrier handoff.
    pub risk_bearer_after_handoff: PartyRole,
    /// Who pays for the main carriage.
    pub cost_bearer: PartyRole,
    /// Who bears risk at the queried instant, given the shipment phase.
    pub current_risk_bearer: PartyRole,
}

impl Liability {
    /// Resolve liability for the given term and shipment phase.
    pub fn determine(trade_term: TradeTerm, phase: ShipmentPhase) -> Self {
        let risk_transfer = trade_term.risk_transfer();
        let cost_allocation = trade_term.cost_allocation();

        // Risk sits with the seller until the transfer point. Relative to
        // the handoff instant: an Origin transfer has already happened, a
        // Destination transfer has not yet happened even post-handoff.
        let risk_bearer_before_handoff = match risk_transfer {
            TransferPoint::Origin => PartyRole::Buyer,
            TransferPoint::CarrierHandoff | TransferPoint::Destination => PartyRole::Seller,
        };
        let risk_bearer_after_handoff = match risk_transfer {
            TransferPoint::Origin | TransferPoint::CarrierHandoff => PartyRole::Buyer,
            TransferPoint::Destination => PartyRole::Seller,
        };
        let cost_bearer = match cost_allocation {
            TransferPoint::Origin => PartyRole::Buyer,
            TransferPoint::CarrierHandoff | TransferPoint::Destination => PartyRole::Seller,
        };
        let current_risk_bearer = match phase {
            ShipmentPhase::PreHandoff => risk_bearer_before_handoff,
            ShipmentPhase::PostHandoff => risk_bearer_after_handoff,
        };

        Self {
            trade_term,
            risk_transfer,
            cost_allocation,
            risk_bearer_before_handoff,
            risk_bearer_after_handoff,
            cost_bearer,
            current_risk_bearer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exw_puts_everything_on_the_buyer() {
        let l = Liability::determine(TradeTerm::Exw, ShipmentPhase::PreHandoff);
        assert_eq!(l.risk_bearer_before_handoff, PartyRole::Buyer);
        assert_eq!(l.risk_bearer_after_handoff, PartyRole::Buyer);
        assert_eq!(l.cost_bearer, PartyRole::Buyer);
        assert_eq!(l.current_risk_bearer, PartyRole::Buyer);
    }

    #[test]
    fn ddp_keeps_everything_on_the_seller() {
        let l = Liability::determine(TradeTerm::Ddp, ShipmentPhase::PostHandoff);
        assert_eq!(l.risk_bearer_before_handoff, PartyRole::Seller);
        assert_eq!(l.risk_bearer_after_handoff, PartyRole::Seller);
        assert_eq!(l.cost_bearer, PartyRole::Seller);
        assert_eq!(l.current_risk_bearer, PartyRole::Seller);
    }

    #[test]
    fn fob_risk_passes_at_handoff() {
        let before = Liability::determine(TradeTerm::Fob, ShipmentPhase::PreHandoff);
        assert_eq!(before.current_risk_bearer, PartyRole::Seller);

        let after = Liability::determine(TradeTerm::Fob, ShipmentPhase::PostHandoff);
        assert_eq!(after.current_risk_bearer, PartyRole::Buyer);
    }

    #[test]
    fn cif_splits_risk_and_cost() {
        // C-group: buyer bears risk from handoff, seller still pays freight.
        let l = Liability::determine(TradeTerm::Cif, ShipmentPhase::PostHandoff);
        assert_eq!(l.current_risk_bearer, PartyRole::Buyer);
        assert_eq!(l.cost_bearer, PartyRole::Seller);
    }

    #[test]
    fn carrier_never_bears_risk_or_cost() {
        for term in TradeTerm::all_terms() {
            for phase in [ShipmentPhase::PreHandoff, ShipmentPhase::PostHandoff] {
                let l = Liability::determine(*term, phase);
                assert_ne!(l.risk_bearer_before_handoff, PartyRole::Carrier);
                assert_ne!(l.risk_bearer_after_handoff, PartyRole::Carrier);
                assert_ne!(l.cost_bearer, PartyRole::Carrier);
            }
        }
    }

    #[test]
    fn serde_roundtrip() {
        let l = Liability::determine(TradeTerm::Fca, ShipmentPhase::PreHandoff);
        let json = serde_json::to_string(&l).unwrap();
        let parsed: Liability = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, l);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_term() -> impl Strategy<Value = TradeTerm> {
            prop::sample::select(TradeTerm::all_terms().to_vec())
        }

        fn any_phase() -> impl Strategy<Value = ShipmentPhase> {
            prop_oneof![
                Just(ShipmentPhase::PreHandoff),
                Just(ShipmentPhase::PostHandoff),
            ]
        }

        proptest! {
            /// Resolution is idempotent: same inputs, same output.
            #[test]
            fn determine_is_idempotent(term in any_term(), phase in any_phase()) {
                let a = Liability::determine(term, phase);
                let b = Liability::determine(term, phase);
                prop_assert_eq!(a, b);
            }

            /// Risk passes from seller to buyer, never the other way: once
            /// the buyer bears risk pre-handoff, the buyer bears it post.
            #[test]
            fn risk_transfer_is_monotonic(term in any_term()) {
                let before = Liability::determine(term, ShipmentPhase::PreHandoff);
                let after = Liability::determine(term, ShipmentPhase::PostHandoff);
                if before.risk_bearer_before_handoff == PartyRole::Buyer {
                    prop_assert_eq!(after.risk_bearer_after_handoff, PartyRole::Buyer);
                }
            }
        }
    }
}
