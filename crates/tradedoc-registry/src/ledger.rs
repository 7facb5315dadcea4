//! # Ledger Seam
//!
//! The collaborator interface through which the core commits document
//! records. [`DocumentStore`] is the in-memory implementation; a
//! replicated ledger would implement the same trait. The atomicity
//! guarantee is the implementor's: a commit either lands in full or is
//! rejected with `Conflict`.

use serde::{Deserialize, Serialize};

use tradedoc_core::DocumentId;
use tradedoc_state::{DocumentKind, Invoice, Lading, Order};

use crate::store::{DocumentStore, RegistryError, TransactionSet};

/// A document record of any kind, tagged for commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentRecord {
    /// An order record.
    Order(Order),
    /// An invoice record.
    Invoice(Invoice),
    /// A bill of lading record.
    Lading(Lading),
}

impl DocumentRecord {
    /// The kind discriminator for this record.
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Order(_) => DocumentKind::Order,
            Self::Invoice(_) => DocumentKind::Invoice,
            Self::Lading(_) => DocumentKind::Lading,
        }
    }
}

/// The ledger of record the core commits document state to.
pub trait Ledger: Send + Sync {
    /// Commit a record for `id`.
    ///
    /// Committing an order opens the transaction; committing an invoice or
    /// lading attaches it to an existing transaction. Fails with
    /// `Conflict` when a record of the same kind already exists for the
    /// id, and with `NotFound` when the prior-stage record is absent.
    fn commit(&self, id: DocumentId, record: DocumentRecord) -> Result<(), RegistryError>;
}

impl Ledger for DocumentStore {
    fn commit(&self, id: DocumentId, record: DocumentRecord) -> Result<(), RegistryError> {
        match record {
            DocumentRecord::Order(order) => self.insert_order(order),
            DocumentRecord::Invoice(invoice) => {
                self.try_mutate(id, |set: &mut TransactionSet| {
                    if set.invoice.is_some() {
                        return Err(RegistryError::Conflict {
                            id,
                            kind: DocumentKind::Invoice,
                        });
                    }
                    set.invoice = Some(invoice);
                    Ok(())
                })
            }
            DocumentRecord::Lading(lading) => self.try_mutate(id, |set: &mut TransactionSet| {
                if set.lading.is_some() {
                    return Err(RegistryError::Conflict {
                        id,
                        kind: DocumentKind::Lading,
                    });
                }
                set.lading = Some(lading);
                Ok(())
            }),
        }
    }
}
