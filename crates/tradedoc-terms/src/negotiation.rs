//! # Trade Term Negotiation
//!
//! Models the proposal/counter-proposal exchange through which buyer and
//! seller settle on a trade term for an invoice.
//!
//! ## States
//!
//! ```text
//! Unset ──propose(term)──▶ Proposed(by, term) ──counterparty echoes──▶ Agreed(term)
//!   │                            │
//!   └──assign(term)──────────────┴──assign(term)──▶ Agreed(term)
//! ```
//!
//! ## Turn Rules
//!
//! - The first `propose` call establishes the opening proposal.
//! - Only the counterparty may respond: echoing the standing term (or
//!   accepting without naming one) finalizes it; naming a different term
//!   counter-proposes and hands the turn back.
//! - The same party proposing twice in a row is a turn violation.
//! - `assign` finalizes a term in one step, bypassing turn order.
//! - `Agreed` is terminal and write-once: every later `assign` or
//!   `propose` is rejected, whichever route produced the agreement.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tradedoc_core::{PartyRole, Timestamp};

use crate::term::TradeTerm;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors arising from trade term negotiation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NegotiationError {
    /// An acceptance was attempted before any term had been proposed.
    #[error("no trade term has been proposed yet")]
    NoTermProposed,

    /// The party holding the last proposal attempted to propose again.
    #[error("{party} already holds the standing proposal; awaiting the counterparty")]
    NotYourTurn {
        /// The party that proposed out of turn.
        party: PartyRole,
    },

    /// The term is already finalized; agreement is write-once.
    #[error("trade term already finalized as {term}")]
    TermAlreadyFinalized {
        /// The term that was finalized.
        term: TradeTerm,
    },

    /// A liability query ran before negotiation or assignment completed.
    #[error("trade term not finalized")]
    TermNotFinalized,
}

// ---------------------------------------------------------------------------
// Negotiation state machine
// ---------------------------------------------------------------------------

/// The negotiation position for one invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NegotiationState {
    /// No term has been proposed or assigned.
    Unset,
    /// A term is on the table, awaiting the counterparty's turn.
    Proposed {
        /// The party whose proposal is standing.
        by: PartyRole,
        /// The proposed term.
        term: TradeTerm,
    },
    /// Both parties agreed; the term is final (terminal state).
    Agreed {
        /// The agreed term.
        term: TradeTerm,
    },
}

impl NegotiationState {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Agreed { .. })
    }
}

/// One step in the negotiation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalRecord {
    /// The party that acted.
    pub by: PartyRole,
    /// The term named, or `None` for a bare acceptance.
    pub term: Option<TradeTerm>,
    /// The state the step produced.
    pub resulting_state: NegotiationState,
    /// When the step occurred.
    pub timestamp: Timestamp,
}

/// Per-invoice negotiation record.
///
/// Tracks the standing proposal and which party made it, and resolves into
/// an agreed term on mutual agreement. The record never forgets a step:
/// every proposal, counter-proposal, acceptance, and assignment is logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Negotiation {
    /// Current negotiation position.
    state: NegotiationState,
    /// Ordered log of every negotiation step.
    history: Vec<ProposalRecord>,
}

impl Negotiation {
    /// Start a fresh negotiation with no standing proposal.
    pub fn new() -> Self {
        Self {
            state: NegotiationState::Unset,
            history: Vec::new(),
        }
    }

    /// Current negotiation position.
    pub fn state(&self) -> NegotiationState {
        self.state
    }

    /// The agreed term, if negotiation has concluded.
    pub fn agreed_term(&self) -> Option<TradeTerm> {
        match self.state {
            NegotiationState::Agreed { term } => Some(term),
            _ => None,
        }
    }

    /// Whether the term is finalized.
    pub fn is_finalized(&self) -> bool {
        self.state.is_terminal()
    }

    /// Ordered log of every negotiation step.
    pub fn history(&self) -> &[ProposalRecord] {
        &self.history
    }

    /// Finalize a term directly, without turn-based exchange.
    ///
    /// Used for a single authoritative assignment where the parties agreed
    /// out of band. Fails once a term is already finalized — first
    /// finalization wins, by either route.
    pub fn assign(&mut self, by: PartyRole, term: TradeTerm) -> Result<(), NegotiationError> {
        if let NegotiationState::Agreed { term } = self.state {
            return Err(NegotiationError::TermAlreadyFinalized { term });
        }
        self.record(by, Some(term), NegotiationState::Agreed { term });
        Ok(())
    }

    /// Take one negotiation turn for `by`.
    ///
    /// `Some(term)` proposes or counter-proposes; `None` accepts the
    /// standing proposal. Returns the resulting state so callers can react
    /// to agreement.
    pub fn propose(
        &mut self,
        by: PartyRole,
        proposal: Option<TradeTerm>,
    ) -> Result<NegotiationState, NegotiationError> {
        let next = match (self.state, proposal) {
            (NegotiationState::Agreed { term }, _) => {
                return Err(NegotiationError::TermAlreadyFinalized { term });
            }
            (NegotiationState::Unset, Some(term)) => NegotiationState::Proposed { by, term },
            (NegotiationState::Unset, None) => {
                return Err(NegotiationError::NoTermProposed);
            }
            (NegotiationState::Proposed { by: last, .. }, _) if last == by => {
                return Err(NegotiationError::NotYourTurn { party: by });
            }
            // Counterparty echoes the standing term, or accepts outright.
            (NegotiationState::Proposed { term, .. }, Some(echoed)) if echoed == term => {
                NegotiationState::Agreed { term }
            }
            (NegotiationState::Proposed { term, .. }, None) => NegotiationState::Agreed { term },
            // Counterparty names a different term: the turn passes back.
            (NegotiationState::Proposed { .. }, Some(counter)) => NegotiationState::Proposed {
                by,
                term: counter,
            },
        };
        self.record(by, proposal, next);
        Ok(next)
    }

    fn record(&mut self, by: PartyRole, term: Option<TradeTerm>, next: NegotiationState) {
        self.history.push(ProposalRecord {
            by,
            term,
            resulting_state: next,
            timestamp: Timestamp::now(),
        });
        self.state = next;
    }
}

impl Default for Negotiation {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
