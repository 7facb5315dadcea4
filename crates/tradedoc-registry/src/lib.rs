//! # tradedoc-registry — The Document Ledger of Record
//!
//! Owns the canonical mapping of transaction id → document records and
//! their lifecycle states. One [`TransactionSet`] per id holds the order,
//! the optional invoice, the optional lading, and the trade term
//! negotiation record.
//!
//! ## Concurrency Model
//!
//! Single writer per transaction: every mutation for an id runs under that
//! id's map entry lock via [`DocumentStore::try_mutate`], so
//! check-then-set is one indivisible step. Two concurrent invoice
//! creations for one order cannot both pass the duplicate check — the
//! second observes the first's write.
//!
//! Cross-document reads take one entry snapshot. Because all records of a
//! transaction live in the same entry, the snapshot reflects a single
//! consistent point in time without a global lock.
//!
//! ## Commit Discipline
//!
//! All validation precedes all mutation: a closure passed to `try_mutate`
//! that returns an error must leave the set untouched, and the store never
//! applies a partial update. Records are never deleted — cancellation is a
//! terminal state flag on the record.

pub mod ledger;
pub mod store;

pub use ledger::{DocumentRecord, Ledger};
pub use store::{DocumentStore, RegistryError, TransactionSet};
