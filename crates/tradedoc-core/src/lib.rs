//! # tradedoc-core — Foundational Types for the Trade Document Stack
//!
//! Defines the type-system primitives shared by every other crate in the
//! workspace: identifier newtypes, party roles, opaque document links, and
//! UTC-only timestamps. Every other crate depends on `tradedoc-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** [`DocumentId`],
//!    [`PartyId`], [`CallerHandle`], [`DocumentLink`] — no bare strings or
//!    integers for identifiers. You cannot pass a party where a document
//!    handle is expected.
//!
//! 2. **Identity is verified, never claimed.** A [`CallerHandle`] is an
//!    unverified label supplied by a caller. It carries no authority until
//!    an identity oracle resolves it to a [`PartyIdentity`]. Engine code
//!    compares resolved [`PartyId`]s, never raw handles.
//!
//! 3. **UTC-only timestamps.** [`Timestamp`] enforces UTC with seconds
//!    precision, rendered as `YYYY-MM-DDTHH:MM:SSZ`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tradedoc-*` crates (this is the leaf of the
//!   DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod link;
pub mod party;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::ValidationError;
pub use identity::{CallerHandle, DocumentId, PartyId};
pub use link::DocumentLink;
pub use party::{PartyIdentity, PartyRole};
pub use temporal::Timestamp;
