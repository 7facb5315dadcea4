//! # Engine Errors
//!
//! The top of the error taxonomy. Lower-layer errors compose upward with
//! `#[from]`; the engine adds the authorization failures only it can
//! detect. Every precondition failure surfaces as a distinct, inspectable
//! kind, returned synchronously with no partial mutation. The core never
//! retries — retry policy belongs to the caller.

use thiserror::Error;

use tradedoc_core::{DocumentId, PartyRole};
use tradedoc_registry::RegistryError;
use tradedoc_state::StateError;
use tradedoc_terms::NegotiationError;

/// Errors returned by the lifecycle engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A caller or named party handle could not be resolved by the
    /// identity oracle.
    #[error("identity not resolved for handle {handle:?}")]
    InvalidParty {
        /// The unresolvable handle.
        handle: String,
    },

    /// A resolved identity does not match the party recorded on the
    /// document.
    #[error("party does not match the recorded {expected} for {id}")]
    PartyMismatch {
        /// The transaction id.
        id: DocumentId,
        /// The role the identity was checked against.
        expected: PartyRole,
    },

    /// A document lifecycle precondition failed.
    #[error(transparent)]
    State(#[from] StateError),

    /// A registry lookup or commit failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A trade term negotiation rule was violated.
    #[error(transparent)]
    Negotiation(#[from] NegotiationError),
}
