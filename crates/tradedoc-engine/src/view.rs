//! # Consolidated Transaction View
//!
//! The read model returned by the consolidated retrieval operation once a
//! shipment is confirmed: all three documents of the transaction, the
//! negotiated term, and the derived liability, taken from one consistent
//! registry snapshot.

use serde::{Deserialize, Serialize};

use tradedoc_state::{Invoice, Lading, Order};
use tradedoc_terms::{Liability, TradeTerm};

/// A consistent view over one complete trade transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionView {
    /// The initiating order.
    pub order: Order,
    /// The derived invoice.
    pub invoice: Invoice,
    /// The derived bill of lading.
    pub lading: Lading,
    /// The negotiated trade term, if finalized.
    pub trade_term: Option<TradeTerm>,
    /// Liability attribution at the snapshot instant, if a term is
    /// finalized.
    pub liability: Option<Liability>,
}
