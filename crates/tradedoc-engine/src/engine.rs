//! # Lifecycle Engine
//!
//! Validates and applies every document transition. Operations follow one
//! discipline: resolve the caller through the oracle, then validate and
//! mutate under the registry entry lock for the id — all checks complete
//! before the first write, so a rejected operation leaves no trace.

use std::sync::Arc;

use tradedoc_core::{CallerHandle, DocumentId, DocumentLink, PartyId, PartyRole};
use tradedoc_registry::{DocumentRecord, DocumentStore, Ledger, RegistryError};
use tradedoc_state::{DocumentKind, Invoice, Lading, Order, StateError};
use tradedoc_terms::{Liability, NegotiationError, NegotiationState, ShipmentPhase, TradeTerm};

use crate::error::EngineError;
use crate::oracle::IdentityOracle;
use crate::view::TransactionView;

/// The role-gated transition engine for trade transactions.
///
/// Holds the registry and the identity oracle as injected collaborators —
/// no ambient state. Cheap to clone handles of: wrap in `Arc` or share the
/// inner `Arc`s.
pub struct LifecycleEngine {
    store: Arc<DocumentStore>,
    oracle: Arc<dyn IdentityOracle>,
}

impl LifecycleEngine {
    /// Create an engine over the given registry and oracle.
    pub fn new(store: Arc<DocumentStore>, oracle: Arc<dyn IdentityOracle>) -> Self {
        Self { store, oracle }
    }

    /// Access the underlying registry (read paths and tooling).
    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Document operations
    // -----------------------------------------------------------------------

    /// Create an order naming a buyer. The caller becomes the order's
    /// seller-side creator. Allocates the transaction id.
    pub fn create_order(
        &self,
        caller: &CallerHandle,
        buyer: &CallerHandle,
        reference_number: u64,
        link: DocumentLink,
    ) -> Result<Order, EngineError> {
        let caller_id = self.resolve(caller)?;
        let buyer_id = self.resolve(buyer)?;

        let id = self.store.allocate();
        let order = Order::new(id, buyer_id, caller_id, reference_number, link);
        self.store
            .commit(id, DocumentRecord::Order(order.clone()))?;
        tracing::info!(%id, buyer = %buyer_id, "order created");
        Ok(order)
    }

    /// Cancel an order. Allowed to the named buyer or the creating seller,
    /// only while the order is active and no invoice exists for the id.
    pub fn cancel_order(
        &self,
        caller: &CallerHandle,
        id: DocumentId,
    ) -> Result<Order, EngineError> {
        let caller_id = self.resolve(caller)?;
        let order = self.store.try_mutate(id, |set| {
            require_any_party(
                id,
                caller_id,
                &[
                    (set.order.buyer, PartyRole::Buyer),
                    (set.order.created_by, PartyRole::Seller),
                ],
            )?;
            if set.invoice.is_some() {
                return Err(StateError::InvoiceExists { id }.into());
            }
            set.order.cancel(caller_id)?;
            Ok::<_, EngineError>(set.order.clone())
        })?;
        tracing::info!(%id, "order cancelled");
        Ok(order)
    }

    /// Derive the invoice from an active order. The caller must be the
    /// named seller, and the named buyer is re-attested against the order.
    pub fn create_invoice(
        &self,
        caller: &CallerHandle,
        buyer: &CallerHandle,
        seller: &CallerHandle,
        id: DocumentId,
    ) -> Result<Invoice, EngineError> {
        let caller_id = self.resolve(caller)?;
        let buyer_id = self.resolve(buyer)?;
        let seller_id = self.resolve(seller)?;

        let invoice = self.store.try_mutate(id, |set| {
            set.order.require_active()?;
            require_party(id, buyer_id, set.order.buyer, PartyRole::Buyer)?;
            require_party(id, caller_id, seller_id, PartyRole::Seller)?;
            if set.invoice.is_some() {
                return Err(RegistryError::Conflict {
                    id,
                    kind: DocumentKind::Invoice,
                }
                .into());
            }
            let invoice = Invoice::new(id, buyer_id, seller_id);
            set.invoice = Some(invoice.clone());
            Ok::<_, EngineError>(invoice)
        })?;
        tracing::info!(%id, seller = %seller_id, "invoice created");
        Ok(invoice)
    }

    /// Cancel an invoice. Allowed to its buyer or seller, only while the
    /// invoice is open and no lading exists for the id.
    pub fn cancel_invoice(
        &self,
        caller: &CallerHandle,
        id: DocumentId,
    ) -> Result<Invoice, EngineError> {
        let caller_id = self.resolve(caller)?;
        let invoice = self.store.try_mutate(id, |set| {
            let invoice = set.invoice.as_mut().ok_or(RegistryError::NotFound {
                id,
                kind: DocumentKind::Invoice,
            })?;
            require_any_party(
                id,
                caller_id,
                &[
                    (invoice.buyer, PartyRole::Buyer),
                    (invoice.seller, PartyRole::Seller),
                ],
            )?;
            if set.lading.is_some() {
                return Err(StateError::LadingExists { id }.into());
            }
            invoice.cancel(caller_id)?;
            Ok::<_, EngineError>(invoice.clone())
        })?;
        tracing::info!(%id, "invoice cancelled");
        Ok(invoice)
    }

    /// Issue the bill of lading from an open invoice, naming the carrier.
    /// The caller must be the invoice's seller.
    pub fn create_lading(
        &self,
        caller: &CallerHandle,
        seller: &CallerHandle,
        carrier: &CallerHandle,
        id: DocumentId,
    ) -> Result<Lading, EngineError> {
        let caller_id = self.resolve(caller)?;
        let seller_id = self.resolve(seller)?;
        let carrier_id = self.resolve(carrier)?;

        let lading = self.store.try_mutate(id, |set| {
            let invoice = set.invoice.as_ref().ok_or(RegistryError::NotFound {
                id,
                kind: DocumentKind::Invoice,
            })?;
            invoice.require_open()?;
            require_party(id, seller_id, invoice.seller, PartyRole::Seller)?;
            require_party(id, caller_id, seller_id, PartyRole::Seller)?;
            if set.lading.is_some() {
                return Err(RegistryError::Conflict {
                    id,
                    kind: DocumentKind::Lading,
                }
                .into());
            }
            let lading = Lading::new(id, seller_id, carrier_id);
            set.lading = Some(lading.clone());
            Ok::<_, EngineError>(lading)
        })?;
        tracing::info!(%id, carrier = %carrier_id, "lading issued");
        Ok(lading)
    }

    /// Confirm the shipment on an issued lading. Only the named carrier
    /// may confirm, and only once.
    pub fn confirm_shipment(
        &self,
        caller: &CallerHandle,
        id: DocumentId,
    ) -> Result<Lading, EngineError> {
        let caller_id = self.resolve(caller)?;
        let lading = self.store.try_mutate(id, |set| {
            let lading = set.lading.as_mut().ok_or(RegistryError::NotFound {
                id,
                kind: DocumentKind::Lading,
            })?;
            require_party(id, caller_id, lading.carrier, PartyRole::Carrier)?;
            lading.confirm_shipment(caller_id)?;
            Ok::<_, EngineError>(lading.clone())
        })?;
        tracing::info!(%id, "shipment confirmed");
        Ok(lading)
    }

    /// Retrieve the consolidated transaction once the shipment is
    /// confirmed. All three parties are re-attested against the records.
    pub fn retrieve_invoice(
        &self,
        buyer: &CallerHandle,
        seller: &CallerHandle,
        carrier: &CallerHandle,
        id: DocumentId,
    ) -> Result<TransactionView, EngineError> {
        let buyer_id = self.resolve(buyer)?;
        let seller_id = self.resolve(seller)?;
        let carrier_id = self.resolve(carrier)?;

        // One snapshot: order, invoice, lading, and negotiation reflect a
        // single consistent point in time.
        let set = self.store.snapshot(id).ok_or(RegistryError::NotFound {
            id,
            kind: DocumentKind::Order,
        })?;
        let invoice = set.invoice.as_ref().ok_or(RegistryError::NotFound {
            id,
            kind: DocumentKind::Invoice,
        })?;
        let lading = set.lading.as_ref().ok_or(RegistryError::NotFound {
            id,
            kind: DocumentKind::Lading,
        })?;
        lading.require_confirmed()?;

        require_party(id, buyer_id, set.order.buyer, PartyRole::Buyer)?;
        require_party(id, buyer_id, invoice.buyer, PartyRole::Buyer)?;
        require_party(id, seller_id, invoice.seller, PartyRole::Seller)?;
        require_party(id, seller_id, lading.seller, PartyRole::Seller)?;
        require_party(id, carrier_id, lading.carrier, PartyRole::Carrier)?;

        let trade_term = invoice.trade_term;
        let liability = trade_term
            .map(|term| Liability::determine(term, shipment_phase(Some(lading))));

        Ok(TransactionView {
            order: set.order.clone(),
            invoice: invoice.clone(),
            lading: lading.clone(),
            trade_term,
            liability,
        })
    }

    // -----------------------------------------------------------------------
    // Trade term operations
    // -----------------------------------------------------------------------

    /// Finalize a trade term directly, without turn-based exchange. The
    /// caller must be the invoice's buyer or seller. First finalization
    /// wins, by either route.
    pub fn assign_trade_terms(
        &self,
        caller: &CallerHandle,
        id: DocumentId,
        term: TradeTerm,
    ) -> Result<Invoice, EngineError> {
        let caller_id = self.resolve(caller)?;
        let invoice = self.store.try_mutate(id, |set| {
            let invoice = set.invoice.as_mut().ok_or(RegistryError::NotFound {
                id,
                kind: DocumentKind::Invoice,
            })?;
            let role = require_any_party(
                id,
                caller_id,
                &[
                    (invoice.buyer, PartyRole::Buyer),
                    (invoice.seller, PartyRole::Seller),
                ],
            )?;
            set.negotiation.assign(role, term)?;
            invoice.record_trade_term(term);
            Ok::<_, EngineError>(invoice.clone())
        })?;
        tracing::info!(%id, %term, "trade term assigned");
        Ok(invoice)
    }

    /// Take one negotiation turn for the caller. `Some(term)` proposes or
    /// counter-proposes; `None` accepts the standing proposal. On
    /// agreement the term is recorded on the invoice in the same atomic
    /// step.
    pub fn negotiate_trade_terms(
        &self,
        caller: &CallerHandle,
        buyer: &CallerHandle,
        seller: &CallerHandle,
        id: DocumentId,
        proposal: Option<TradeTerm>,
    ) -> Result<NegotiationState, EngineError> {
        let caller_id = self.resolve(caller)?;
        let buyer_id = self.resolve(buyer)?;
        let seller_id = self.resolve(seller)?;

        let state = self.store.try_mutate(id, |set| {
            let invoice = set.invoice.as_mut().ok_or(RegistryError::NotFound {
                id,
                kind: DocumentKind::Invoice,
            })?;
            require_party(id, buyer_id, invoice.buyer, PartyRole::Buyer)?;
            require_party(id, seller_id, invoice.seller, PartyRole::Seller)?;
            let role = require_any_party(
                id,
                caller_id,
                &[
                    (invoice.buyer, PartyRole::Buyer),
                    (invoice.seller, PartyRole::Seller),
                ],
            )?;
            let state = set.negotiation.propose(role, proposal)?;
            if let NegotiationState::Agreed { term } = state {
                invoice.record_trade_term(term);
            }
            Ok::<_, EngineError>(state)
        })?;
        tracing::debug!(%id, ?state, "negotiation turn taken");
        Ok(state)
    }

    /// Resolve liability for the transaction's current shipment instant.
    /// Pure and idempotent: no state is mutated, and unchanged inputs
    /// yield identical output.
    pub fn determine_liability(
        &self,
        buyer: &CallerHandle,
        seller: &CallerHandle,
        id: DocumentId,
    ) -> Result<Liability, EngineError> {
        let buyer_id = self.resolve(buyer)?;
        let seller_id = self.resolve(seller)?;

        let set = self.store.snapshot(id).ok_or(RegistryError::NotFound {
            id,
            kind: DocumentKind::Order,
        })?;
        let invoice = set.invoice.as_ref().ok_or(RegistryError::NotFound {
            id,
            kind: DocumentKind::Invoice,
        })?;
        require_party(id, buyer_id, invoice.buyer, PartyRole::Buyer)?;
        require_party(id, seller_id, invoice.seller, PartyRole::Seller)?;

        let term = invoice
            .trade_term
            .ok_or(NegotiationError::TermNotFinalized)?;
        Ok(Liability::determine(term, shipment_phase(set.lading.as_ref())))
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn resolve(&self, handle: &CallerHandle) -> Result<PartyId, EngineError> {
        self.oracle
            .resolve(handle)
            .map(|identity| identity.party_id)
            .ok_or_else(|| EngineError::InvalidParty {
                handle: handle.as_str().to_string(),
            })
    }
}

impl std::fmt::Debug for LifecycleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleEngine")
            .field("store", &self.store)
            .finish()
    }
}

/// Validate that a resolved identity matches the recorded party for a role.
fn require_party(
    id: DocumentId,
    candidate: PartyId,
    recorded: PartyId,
    expected: PartyRole,
) -> Result<(), EngineError> {
    if candidate == recorded {
        Ok(())
    } else {
        Err(EngineError::PartyMismatch { id, expected })
    }
}

/// Validate that a resolved identity matches one of the allowed parties,
/// returning the matched role. The mismatch error reports the first
/// allowed role.
fn require_any_party(
    id: DocumentId,
    candidate: PartyId,
    allowed: &[(PartyId, PartyRole)],
) -> Result<PartyRole, EngineError> {
    for (recorded, role) in allowed {
        if candidate == *recorded {
            return Ok(*role);
        }
    }
    Err(EngineError::PartyMismatch {
        id,
        expected: allowed[0].1,
    })
}

/// Where the goods stand, derived from the lading record.
fn shipment_phase(lading: Option<&Lading>) -> ShipmentPhase {
    match lading {
        Some(lading) if lading.is_confirmed() => ShipmentPhase::PostHandoff,
        _ => ShipmentPhase::PreHandoff,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::StaticIdentityOracle;
    use tradedoc_core::PartyIdentity;

    struct Fixture {
        engine: LifecycleEngine,
        buyer: CallerHandle,
        seller: CallerHandle,
        carrier: CallerHandle,
    }

    fn fixture() -> Fixture {
        let oracle = Arc::new(StaticIdentityOracle::new());
        let buyer = CallerHandle::new("buyer-1").unwrap();
        let seller = CallerHandle::new("seller-1").unwrap();
        let carrier = CallerHandle::new("carrier-1").unwrap();
        oracle.register(buyer.clone(), PartyIdentity::new(PartyId::new()));
        oracle.register(seller.clone(), PartyIdentity::new(PartyId::new()));
        oracle.register(carrier.clone(), PartyIdentity::new(PartyId::new()));

        Fixture {
            engine: LifecycleEngine::new(Arc::new(DocumentStore::new()), oracle),
            buyer,
            seller,
            carrier,
        }
    }

    fn link() -> DocumentLink {
        DocumentLink::new("example.json").unwrap()
    }

    fn opened_order(fx: &Fixture) -> DocumentId {
        fx.engine
            .create_order(&fx.seller, &fx.buyer, 1, link())
            .expect("create order")
            .id
    }

    fn invoiced(fx: &Fixture) -> DocumentId {
        let id = opened_order(fx);
        fx.engine
            .create_invoice(&fx.seller, &fx.buyer, &fx.seller, id)
            .expect("create invoice");
        id
    }

    fn laded(fx: &Fixture) -> DocumentId {
        let id = invoiced(fx);
        fx.engine
            .create_lading(&fx.seller, &fx.seller, &fx.carrier, id)
            .expect("create lading");
        id
    }

    // -- create_order --

    #[test]
    fn create_order_allocates_sequential_ids() {
        let fx = fixture();
        let a = opened_order(&fx);
        let b = opened_order(&fx);
        assert!(a < b);
    }

    #[test]
    fn create_order_with_unknown_buyer_fails() {
        let fx = fixture();
        let ghost = CallerHandle::new("ghost").unwrap();
        let err = fx
            .engine
            .create_order(&fx.seller, &ghost, 1, link())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidParty { .. }));
    }

    #[test]
    fn create_order_with_unknown_caller_fails() {
        let fx = fixture();
        let ghost = CallerHandle::new("ghost").unwrap();
        let err = fx
            .engine
            .create_order(&ghost, &fx.buyer, 1, link())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidParty { .. }));
    }

    // -- cancel_order --

    #[test]
    fn cancel_order_by_buyer() {
        let fx = fixture();
        let id = opened_order(&fx);
        let order = fx.engine.cancel_order(&fx.buyer, id).unwrap();
        assert!(!order.is_active());
    }

    #[test]
    fn cancel_order_twice_fails() {
        let fx = fixture();
        let id = opened_order(&fx);
        fx.engine.cancel_order(&fx.seller, id).unwrap();
        let err = fx.engine.cancel_order(&fx.seller, id).unwrap_err();
        assert!(matches!(
            err,
            EngineError::State(StateError::AlreadyCancelled { .. })
        ));
    }

    #[test]
    fn cancel_order_blocked_by_invoice() {
        let fx = fixture();
        let id = invoiced(&fx);
        let err = fx.engine.cancel_order(&fx.buyer, id).unwrap_err();
        assert_eq!(err, EngineError::State(StateError::InvoiceExists { id }));
    }

    #[test]
    fn cancel_order_by_stranger_fails() {
        let fx = fixture();
        let id = opened_order(&fx);
        let err = fx.engine.cancel_order(&fx.carrier, id).unwrap_err();
        assert!(matches!(err, EngineError::PartyMismatch { .. }));
    }

    #[test]
    fn cancel_missing_order_is_not_found() {
        let fx = fixture();
        let err = fx
            .engine
            .cancel_order(&fx.buyer, DocumentId::from_raw(404))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Registry(RegistryError::NotFound { .. })
        ));
    }

    // -- create_invoice --

    #[test]
    fn create_invoice_requires_active_order() {
        let fx = fixture();
        let id = opened_order(&fx);
        fx.engine.cancel_order(&fx.buyer, id).unwrap();
        let err = fx
            .engine
            .create_invoice(&fx.seller, &fx.buyer, &fx.seller, id)
            .unwrap_err();
        assert_eq!(err, EngineError::State(StateError::OrderNotActive { id }));
    }

    #[test]
    fn create_invoice_rejects_wrong_buyer() {
        let fx = fixture();
        let id = opened_order(&fx);
        let err = fx
            .engine
            .create_invoice(&fx.seller, &fx.carrier, &fx.seller, id)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::PartyMismatch {
                id,
                expected: PartyRole::Buyer,
            }
        );
    }

    #[test]
    fn create_invoice_rejects_caller_other_than_seller() {
        let fx = fixture();
        let id = opened_order(&fx);
        let err = fx
            .engine
            .create_invoice(&fx.buyer, &fx.buyer, &fx.seller, id)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::PartyMismatch {
                id,
                expected: PartyRole::Seller,
            }
        );
    }

    #[test]
    fn duplicate_invoice_conflicts() {
        let fx = fixture();
        let id = invoiced(&fx);
        let err = fx
            .engine
            .create_invoice(&fx.seller, &fx.buyer, &fx.seller, id)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::Registry(RegistryError::Conflict {
                id,
                kind: DocumentKind::Invoice,
            })
        );
    }

    // -- cancel_invoice --

    #[test]
    fn cancel_invoice_unlocks_nothing_else() {
        let fx = fixture();
        let id = invoiced(&fx);
        let invoice = fx.engine.cancel_invoice(&fx.buyer, id).unwrap();
        assert!(!invoice.is_open());
        // The order stays locked: cancellation is still blocked.
        let err = fx.engine.cancel_order(&fx.buyer, id).unwrap_err();
        assert_eq!(err, EngineError::State(StateError::InvoiceExists { id }));
    }

    #[test]
    fn cancel_invoice_blocked_by_lading() {
        let fx = fixture();
        let id = laded(&fx);
        let err = fx.engine.cancel_invoice(&fx.seller, id).unwrap_err();
        assert_eq!(err, EngineError::State(StateError::LadingExists { id }));
    }

    // -- create_lading --

    #[test]
    fn create_lading_requires_open_invoice() {
        let fx = fixture();
        let id = invoiced(&fx);
        fx.engine.cancel_invoice(&fx.buyer, id).unwrap();
        let err = fx
            .engine
            .create_lading(&fx.seller, &fx.seller, &fx.carrier, id)
            .unwrap_err();
        assert_eq!(err, EngineError::State(StateError::InvoiceNotOpen { id }));
    }

    #[test]
    fn create_lading_without_invoice_is_not_found() {
        let fx = fixture();
        let id = opened_order(&fx);
        let err = fx
            .engine
            .create_lading(&fx.seller, &fx.seller, &fx.carrier, id)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::Registry(RegistryError::NotFound {
                id,
                kind: DocumentKind::Invoice,
            })
        );
    }

    #[test]
    fn duplicate_lading_conflicts() {
        let fx = fixture();
        let id = laded(&fx);
        let err = fx
            .engine
            .create_lading(&fx.seller, &fx.seller, &fx.carrier, id)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::Registry(RegistryError::Conflict {
                id,
                kind: DocumentKind::Lading,
            })
        );
    }

    // -- confirm_shipment --

    #[test]
    fn confirm_shipment_is_non_idempotent() {
        let fx = fixture();
        let id = laded(&fx);
        fx.engine.confirm_shipment(&fx.carrier, id).unwrap();
        let err = fx.engine.confirm_shipment(&fx.carrier, id).unwrap_err();
        assert_eq!(err, EngineError::State(StateError::AlreadyConfirmed { id }));
    }

    #[test]
    fn only_the_carrier_confirms() {
        let fx = fixture();
        let id = laded(&fx);
        let err = fx.engine.confirm_shipment(&fx.seller, id).unwrap_err();
        assert_eq!(
            err,
            EngineError::PartyMismatch {
                id,
                expected: PartyRole::Carrier,
            }
        );
    }

    // -- trade terms --

    #[test]
    fn assign_then_negotiate_is_rejected() {
        let fx = fixture();
        let id = invoiced(&fx);
        let invoice = fx
            .engine
            .assign_trade_terms(&fx.seller, id, TradeTerm::Fob)
            .unwrap();
        assert_eq!(invoice.trade_term, Some(TradeTerm::Fob));

        let err = fx
            .engine
            .negotiate_trade_terms(&fx.buyer, &fx.buyer, &fx.seller, id, Some(TradeTerm::Cif))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::Negotiation(NegotiationError::TermAlreadyFinalized {
                term: TradeTerm::Fob,
            })
        );
    }

    #[test]
    fn negotiation_agreement_lands_on_invoice() {
        let fx = fixture();
        let id = invoiced(&fx);
        fx.engine
            .negotiate_trade_terms(&fx.buyer, &fx.buyer, &fx.seller, id, Some(TradeTerm::Fca))
            .unwrap();
        let state = fx
            .engine
            .negotiate_trade_terms(&fx.seller, &fx.buyer, &fx.seller, id, Some(TradeTerm::Fca))
            .unwrap();
        assert_eq!(state, NegotiationState::Agreed { term: TradeTerm::Fca });

        let set = fx.engine.store().snapshot(id).unwrap();
        assert_eq!(set.invoice.unwrap().trade_term, Some(TradeTerm::Fca));
    }

    #[test]
    fn carrier_cannot_negotiate() {
        let fx = fixture();
        let id = invoiced(&fx);
        let err = fx
            .engine
            .negotiate_trade_terms(&fx.carrier, &fx.buyer, &fx.seller, id, Some(TradeTerm::Fob))
            .unwrap_err();
        assert!(matches!(err, EngineError::PartyMismatch { .. }));
    }

    // -- liability --

    #[test]
    fn liability_requires_finalized_term() {
        let fx = fixture();
        let id = invoiced(&fx);
        let err = fx
            .engine
            .determine_liability(&fx.buyer, &fx.seller, id)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::Negotiation(NegotiationError::TermNotFinalized)
        );
    }

    #[test]
    fn liability_tracks_shipment_phase() {
        let fx = fixture();
        let id = invoiced(&fx);
        fx.engine
            .assign_trade_terms(&fx.buyer, id, TradeTerm::Fob)
            .unwrap();

        let before = fx
            .engine
            .determine_liability(&fx.buyer, &fx.seller, id)
            .unwrap();
        assert_eq!(before.current_risk_bearer, PartyRole::Seller);

        fx.engine
            .create_lading(&fx.seller, &fx.seller, &fx.carrier, id)
            .unwrap();
        fx.engine.confirm_shipment(&fx.carrier, id).unwrap();

        let after = fx
            .engine
            .determine_liability(&fx.buyer, &fx.seller, id)
            .unwrap();
        assert_eq!(after.current_risk_bearer, PartyRole::Buyer);
    }

    #[test]
    fn liability_is_idempotent() {
        let fx = fixture();
        let id = invoiced(&fx);
        fx.engine
            .assign_trade_terms(&fx.buyer, id, TradeTerm::Cip)
            .unwrap();
        let a = fx
            .engine
            .determine_liability(&fx.buyer, &fx.seller, id)
            .unwrap();
        let b = fx
            .engine
            .determine_liability(&fx.buyer, &fx.seller, id)
            .unwrap();
        assert_eq!(a, b);
    }

    // -- retrieve_invoice --

    #[test]
    fn retrieve_before_confirmation_fails() {
        let fx = fixture();
        let id = laded(&fx);
        let err = fx
            .engine
            .retrieve_invoice(&fx.buyer, &fx.seller, &fx.carrier, id)
            .unwrap_err();
        assert_eq!(err, EngineError::State(StateError::NotShipped { id }));
    }

    #[test]
    fn retrieve_rejects_swapped_parties() {
        let fx = fixture();
        let id = laded(&fx);
        fx.engine.confirm_shipment(&fx.carrier, id).unwrap();
        let err = fx
            .engine
            .retrieve_invoice(&fx.seller, &fx.buyer, &fx.carrier, id)
            .unwrap_err();
        assert!(matches!(err, EngineError::PartyMismatch { .. }));
    }
}
