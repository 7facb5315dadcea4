//! # Flow Subcommand
//!
//! Runs one complete transaction against an in-memory engine with three
//! locally registered parties, and prints the consolidated view as JSON.

use std::sync::Arc;

use clap::Args;

use tradedoc_core::{CallerHandle, DocumentLink, PartyId, PartyIdentity};
use tradedoc_engine::{LifecycleEngine, StaticIdentityOracle, TransactionView};
use tradedoc_registry::DocumentStore;
use tradedoc_terms::TradeTerm;

/// Arguments for the `flow` subcommand.
#[derive(Args, Debug)]
pub struct FlowArgs {
    /// Trade term to assign before shipment (three-letter code, e.g. FOB).
    #[arg(long, default_value = "FCA")]
    pub term: String,

    /// Reference number recorded on the order.
    #[arg(long, default_value_t = 1)]
    pub reference: u64,

    /// Opaque link to the externally stored order document.
    #[arg(long, default_value = "example.json")]
    pub link: String,
}

/// Drive the full lifecycle and return the consolidated view.
pub fn run(args: &FlowArgs) -> anyhow::Result<TransactionView> {
    let term: TradeTerm = args.term.parse()?;

    let oracle = Arc::new(StaticIdentityOracle::new());
    let buyer = CallerHandle::new("buyer")?;
    let seller = CallerHandle::new("seller")?;
    let carrier = CallerHandle::new("carrier")?;
    oracle.register(
        buyer.clone(),
        PartyIdentity::named(PartyId::new(), "Demo Buyer"),
    );
    oracle.register(
        seller.clone(),
        PartyIdentity::named(PartyId::new(), "Demo Seller"),
    );
    oracle.register(
        carrier.clone(),
        PartyIdentity::named(PartyId::new(), "Demo Carrier"),
    );

    let engine = LifecycleEngine::new(Arc::new(DocumentStore::new()), oracle);

    let order = engine.create_order(
        &seller,
        &buyer,
        args.reference,
        DocumentLink::new(args.link.clone())?,
    )?;
    engine.create_invoice(&seller, &buyer, &seller, order.id)?;
    engine.create_lading(&seller, &seller, &carrier, order.id)?;
    engine.assign_trade_terms(&seller, order.id, term)?;
    engine.confirm_shipment(&carrier, order.id)?;

    let view = engine.retrieve_invoice(&buyer, &seller, &carrier, order.id)?;
    tracing::info!(id = %order.id, term = %term, "flow complete");
    Ok(view)
}
