//! # tradedoc-state — Document Lifecycle State Machines
//!
//! Implements the three document lifecycles of a trade transaction as
//! runtime-validated state machines. Each document type holds its own
//! state enum, validated transition methods, and an ordered transition log.
//!
//! ## State Machines
//!
//! - **Order** (`order.rs`): `Active → Cancelled` (terminal). Locked
//!   against cancellation once an invoice exists for the id.
//! - **Invoice** (`invoice.rs`): `Open → Cancelled` (terminal). Locked
//!   once a bill of lading exists. Carries the negotiated trade term,
//!   write-once after finalization.
//! - **Lading** (`lading.rs`): `Issued → ShipmentConfirmed` (terminal).
//!   Confirmation happens exactly once; re-confirmation is an error.
//!
//! ## Design
//!
//! Runtime enums with validated transitions rather than typestate types:
//! these records live inside a shared registry map and are mutated through
//! `&mut` access under an entry lock, which a typestate `self`-consuming
//! API cannot be driven through. Every transition method validates fully
//! before mutating and appends a [`TransitionRecord`] on success. The
//! cross-document ordering rules (an invoice blocks order cancellation, a
//! lading blocks invoice cancellation) are enforced where both records are
//! visible — in the lifecycle engine — using the same [`StateError`]
//! taxonomy defined here.

pub mod error;
pub mod invoice;
pub mod kind;
pub mod lading;
pub mod order;
pub mod transition;

pub use error::StateError;
pub use invoice::{Invoice, InvoiceState};
pub use kind::DocumentKind;
pub use lading::{Lading, LadingState};
pub use order::{Order, OrderState};
pub use transition::TransitionRecord;
