//! # Document Store
//!
//! In-memory registry backed by `DashMap`. The `try_mutate` pattern keeps
//! state transitions TOCTOU-free: read, validate, and update run under a
//! single entry write lock.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tradedoc_core::DocumentId;
use tradedoc_state::{DocumentKind, Invoice, Lading, Order};
use tradedoc_terms::Negotiation;

// ---------------------------------------------------------------------------
// Registry error type
// ---------------------------------------------------------------------------

/// Errors arising from registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The referenced document does not exist.
    #[error("no {kind} found for {id}")]
    NotFound {
        /// The transaction id.
        id: DocumentId,
        /// The document kind that was looked up.
        kind: DocumentKind,
    },

    /// A document of this kind already exists for the id.
    #[error("a {kind} already exists for {id}")]
    Conflict {
        /// The transaction id.
        id: DocumentId,
        /// The document kind that collided.
        kind: DocumentKind,
    },
}

// ---------------------------------------------------------------------------
// Transaction set
// ---------------------------------------------------------------------------

/// All records of one trade transaction, correlated by id.
///
/// The order always exists (ids are only allocated at order creation);
/// invoice and lading appear as the transaction progresses. Keeping the
/// set in one registry entry is what makes cross-document reads
/// consistent: a snapshot of the entry is a snapshot of the transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSet {
    /// The initiating order.
    pub order: Order,
    /// The derived invoice, at most one.
    pub invoice: Option<Invoice>,
    /// The derived bill of lading, at most one.
    pub lading: Option<Lading>,
    /// The trade term negotiation record for the invoice.
    pub negotiation: Negotiation,
}

impl TransactionSet {
    /// Open a new transaction around an order.
    pub fn new(order: Order) -> Self {
        Self {
            order,
            invoice: None,
            lading: None,
            negotiation: Negotiation::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Document store
// ---------------------------------------------------------------------------

/// In-memory document registry.
///
/// Thread-safe via `DashMap`; ids come from a monotonic counter and are
/// never reused. All mutation goes through [`DocumentStore::try_mutate`],
/// which holds the entry write lock across validation and update.
pub struct DocumentStore {
    transactions: DashMap<DocumentId, TransactionSet>,
    next_id: AtomicU64,
}

impl DocumentStore {
    /// Create an empty store. The first allocated id is 1.
    pub fn new() -> Self {
        Self {
            transactions: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Allocate the next transaction id. Monotonic and collision-free.
    pub fn allocate(&self) -> DocumentId {
        DocumentId::from_raw(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Open a transaction around a newly created order.
    ///
    /// Fails with `Conflict` if a transaction already exists for the id —
    /// callers that allocate ids through [`DocumentStore::allocate`] never
    /// hit this.
    pub fn insert_order(&self, order: Order) -> Result<(), RegistryError> {
        let id = order.id;
        match self.transactions.entry(id) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(RegistryError::Conflict {
                id,
                kind: DocumentKind::Order,
            }),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(TransactionSet::new(order));
                tracing::debug!(%id, "transaction opened");
                Ok(())
            }
        }
    }

    /// Run a validated mutation against the transaction set for `id`,
    /// atomically with respect to concurrent readers and writers of the
    /// same id.
    ///
    /// The closure must validate completely before mutating; an `Err`
    /// return is expected to leave the set untouched.
    pub fn try_mutate<T, E, F>(&self, id: DocumentId, f: F) -> Result<T, E>
    where
        E: From<RegistryError>,
        F: FnOnce(&mut TransactionSet) -> Result<T, E>,
    {
        let mut entry = self.transactions.get_mut(&id).ok_or(RegistryError::NotFound {
            id,
            kind: DocumentKind::Order,
        })?;
        f(entry.value_mut())
    }

    /// Take a consistent snapshot of the transaction for `id`.
    pub fn snapshot(&self, id: DocumentId) -> Option<TransactionSet> {
        self.transactions.get(&id).map(|r| r.value().clone())
    }

    /// Look up a single document record by id and kind.
    pub fn get(&self, id: DocumentId, kind: DocumentKind) -> Option<crate::DocumentRecord> {
        let set = self.transactions.get(&id)?;
        match kind {
            DocumentKind::Order => Some(crate::DocumentRecord::Order(set.order.clone())),
            DocumentKind::Invoice => set
                .invoice
                .clone()
                .map(crate::DocumentRecord::Invoice),
            DocumentKind::Lading => set.lading.clone().map(crate::DocumentRecord::Lading),
        }
    }

    /// Whether a transaction exists for `id`.
    pub fn contains(&self, id: DocumentId) -> bool {
        self.transactions.contains_key(&id)
    }

    /// Number of open transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the store holds no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("transactions", &self.transactions.len())
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tradedoc_core::{DocumentLink, PartyId};

    fn sample_order(id: DocumentId) -> Order {
        Order::new(
            id,
            PartyId::new(),
            PartyId::new(),
            1,
            DocumentLink::new("example.json").unwrap(),
        )
    }

    #[test]
    fn allocation_is_monotonic() {
        let store = DocumentStore::new();
        let a = store.allocate();
        let b = store.allocate();
        let c = store.allocate();
        assert!(a < b && b < c);
        assert_eq!(a.as_u64(), 1);
    }

    #[test]
    fn insert_then_snapshot() {
        let store = DocumentStore::new();
        let id = store.allocate();
        store.insert_order(sample_order(id)).unwrap();

        let set = store.snapshot(id).expect("transaction exists");
        assert_eq!(set.order.id, id);
        assert!(set.invoice.is_none());
        assert!(set.lading.is_none());
    }

    #[test]
    fn duplicate_insert_conflicts() {
        let store = DocumentStore::new();
        let id = store.allocate();
        store.insert_order(sample_order(id)).unwrap();
        let err = store.insert_order(sample_order(id)).unwrap_err();
        assert_eq!(
            err,
            RegistryError::Conflict {
                id,
                kind: DocumentKind::Order,
            }
        );
    }

    #[test]
    fn try_mutate_missing_id_is_not_found() {
        let store = DocumentStore::new();
        let id = DocumentId::from_raw(99);
        let result: Result<(), RegistryError> = store.try_mutate(id, |_| Ok(()));
        assert_eq!(
            result.unwrap_err(),
            RegistryError::NotFound {
                id,
                kind: DocumentKind::Order,
            }
        );
    }

    #[test]
    fn try_mutate_applies_changes() {
        let store = DocumentStore::new();
        let id = store.allocate();
        store.insert_order(sample_order(id)).unwrap();

        let buyer = store.snapshot(id).unwrap().order.buyer;
        store
            .try_mutate::<_, RegistryError, _>(id, |set| {
                set.invoice = Some(Invoice::new(id, buyer, set.order.created_by));
                Ok(())
            })
            .unwrap();

        assert!(store.snapshot(id).unwrap().invoice.is_some());
    }

    #[test]
    fn failed_mutation_leaves_no_trace() {
        let store = DocumentStore::new();
        let id = store.allocate();
        store.insert_order(sample_order(id)).unwrap();

        let result: Result<(), RegistryError> = store.try_mutate(id, |set| {
            // Validation failure before any mutation.
            if set.invoice.is_none() {
                return Err(RegistryError::NotFound {
                    id,
                    kind: DocumentKind::Invoice,
                });
            }
            set.lading = Some(Lading::new(id, PartyId::new(), PartyId::new()));
            Ok(())
        });
        assert!(result.is_err());
        assert!(store.snapshot(id).unwrap().lading.is_none());
    }

    #[test]
    fn get_by_kind() {
        let store = DocumentStore::new();
        let id = store.allocate();
        store.insert_order(sample_order(id)).unwrap();

        assert!(store.get(id, DocumentKind::Order).is_some());
        assert!(store.get(id, DocumentKind::Invoice).is_none());
        assert!(store.get(id, DocumentKind::Lading).is_none());
    }

    #[test]
    fn concurrent_allocations_never_collide() {
        let store = std::sync::Arc::new(DocumentStore::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                (0..100).map(|_| store.allocate().as_u64()).collect::<Vec<_>>()
            }));
        }
        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread"))
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 800);
    }
}
