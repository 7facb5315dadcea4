//! # Lifecycle State Errors
//!
//! Every precondition failure in the document lifecycles surfaces as a
//! distinct, inspectable variant — never a generic rejection. The
//! cross-document variants ([`StateError::InvoiceExists`],
//! [`StateError::LadingExists`]) are raised by the lifecycle engine, which
//! is the layer that can see both records of the pair.

use thiserror::Error;

use tradedoc_core::DocumentId;

use crate::kind::DocumentKind;

/// A document lifecycle operation was attempted outside its allowed state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Cancellation was attempted on an already-cancelled document.
    #[error("{kind} {id} is already cancelled")]
    AlreadyCancelled {
        /// The document kind.
        kind: DocumentKind,
        /// The transaction id.
        id: DocumentId,
    },

    /// An invoice was derived from an order that is not active.
    #[error("order {id} is not active")]
    OrderNotActive {
        /// The transaction id.
        id: DocumentId,
    },

    /// A lading was derived from an invoice that is not open.
    #[error("invoice {id} is not open")]
    InvoiceNotOpen {
        /// The transaction id.
        id: DocumentId,
    },

    /// Shipment confirmation was repeated on a confirmed lading.
    #[error("shipment for lading {id} is already confirmed")]
    AlreadyConfirmed {
        /// The transaction id.
        id: DocumentId,
    },

    /// A consolidated retrieval ran before shipment confirmation.
    #[error("shipment for lading {id} is not confirmed")]
    NotShipped {
        /// The transaction id.
        id: DocumentId,
    },

    /// Order cancellation was blocked by an existing invoice.
    #[error("order {id} is locked: an invoice exists for it")]
    InvoiceExists {
        /// The transaction id.
        id: DocumentId,
    },

    /// Invoice cancellation was blocked by an existing lading.
    #[error("invoice {id} is locked: a bill of lading exists for it")]
    LadingExists {
        /// The transaction id.
        id: DocumentId,
    },
}
