//! # tradedoc-terms — Incoterms Rules and Liability Resolution
//!
//! Defines the fixed table of the 11 Incoterms rules, the deterministic
//! liability resolver derived from it, and the per-invoice negotiation
//! state machine through which buyer and seller settle on a term.
//!
//! ## Modules
//!
//! - **`term`**: the [`TradeTerm`] enum — one variant per Incoterms rule,
//!   each mapping to a fixed (risk-transfer, cost-allocation) pair of
//!   [`TransferPoint`]s along the shipment path.
//! - **`liability`**: [`Liability`] — who bears risk and cost at a given
//!   shipment instant. Pure derivation from the table, no mutable state.
//! - **`negotiation`**: [`Negotiation`] — `Unset → Proposed → Agreed`
//!   turn-based machine; agreement is write-once.
//!
//! ## Design
//!
//! The term table is a single exhaustive `match` — adding a variant forces
//! every consumer to handle it at compile time. There is exactly one
//! definition of the table in the workspace.

pub mod liability;
pub mod negotiation;
pub mod term;

pub use liability::{Liability, ShipmentPhase};
pub use negotiation::{Negotiation, NegotiationError, NegotiationState, ProposalRecord};
pub use term::{TradeTerm, TransferPoint, TRADE_TERM_COUNT};
