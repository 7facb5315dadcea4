//! # Identifier Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout the stack. Each
//! identifier is a distinct type — you cannot pass a [`PartyId`] where a
//! [`DocumentId`] is expected.
//!
//! ## Validation
//!
//! [`CallerHandle`] validates at construction time (non-empty, bounded
//! length). [`PartyId`] is always valid by construction (random UUID).
//! [`DocumentId`] values are only handed out by the document registry's
//! monotonic allocator; this module just defines the wrapper.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// DocumentId — monotonic transaction handle
// ---------------------------------------------------------------------------

/// Unique handle correlating an order with its derived invoice and bill of
/// lading.
///
/// Allocated once, at order creation, by the registry's monotonic counter;
/// never reused across unrelated transactions. The inner integer is opaque
/// to callers — it carries no meaning beyond identity and allocation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(u64);

impl DocumentId {
    /// Wrap a raw allocator value. Intended for the registry and for test
    /// fixtures; ordinary callers receive ids from `allocate()`.
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Access the underlying counter value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "doc:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PartyId — verified counterparty identifier
// ---------------------------------------------------------------------------

/// Unique identifier for a counterparty (buyer, seller, or carrier
/// organization).
///
/// Assigned by the identity oracle when an organization is registered.
/// Document records store `PartyId`s, never caller-supplied handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartyId(Uuid);

impl PartyId {
    /// Create a new random party identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a party identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PartyId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PartyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "party:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// CallerHandle — unverified caller label
// ---------------------------------------------------------------------------

/// Maximum accepted caller handle length in bytes.
const CALLER_HANDLE_MAX_LEN: usize = 256;

/// An unverified label identifying the caller of an operation.
///
/// Handles carry no authority. Before any mutating operation, the engine
/// resolves the handle through the identity oracle and works with the
/// resulting [`PartyId`]. A handle that the oracle does not recognize
/// authorizes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerHandle(String);

impl CallerHandle {
    /// Create a caller handle, rejecting empty or oversized input.
    pub fn new(handle: impl Into<String>) -> Result<Self, ValidationError> {
        let handle = handle.into();
        if handle.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "caller handle",
            });
        }
        if handle.len() > CALLER_HANDLE_MAX_LEN {
            return Err(ValidationError::TooLong {
                field: "caller handle",
                max: CALLER_HANDLE_MAX_LEN,
            });
        }
        Ok(Self(handle))
    }

    /// Access the handle as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CallerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
