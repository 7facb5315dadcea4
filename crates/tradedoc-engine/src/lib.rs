//! # tradedoc-engine — Role-Gated Lifecycle Operations
//!
//! The transition engine for trade transactions. Every operation resolves
//! the caller through the identity oracle, validates the current state in
//! the document registry, and applies the transition atomically — or
//! rejects it with a distinct error before any state changes.
//!
//! ## Control Flow
//!
//! ```text
//! caller ──▶ LifecycleEngine ──resolve──▶ IdentityOracle
//!                  │
//!                  ├──validate + apply (one entry lock)──▶ DocumentStore
//!                  │
//!                  └──liability queries──▶ tradedoc-terms
//! ```
//!
//! ## Authorization Model
//!
//! Callers present an unverified [`CallerHandle`](tradedoc_core::CallerHandle);
//! the oracle resolves it to a [`PartyIdentity`](tradedoc_core::PartyIdentity)
//! or the operation fails. Every creation step re-validates the full party
//! chain against the prior-stage records rather than trusting the
//! immediately preceding reference — each stage is a re-attested
//! checkpoint, not a blind pointer-follow.

pub mod engine;
pub mod error;
pub mod oracle;
pub mod view;

pub use engine::LifecycleEngine;
pub use error::EngineError;
pub use oracle::{IdentityOracle, StaticIdentityOracle};
pub use view::TransactionView;
