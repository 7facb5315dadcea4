//! # Identity Oracle
//!
//! The collaborator that vouches for caller identities. The engine never
//! trusts a caller-supplied handle: it resolves the handle here and works
//! with the verified [`PartyIdentity`] — an unresolvable handle authorizes
//! nothing.

use dashmap::DashMap;

use tradedoc_core::{CallerHandle, PartyIdentity};

/// Resolves caller handles to verified party identities.
///
/// Implementations are expected to be cheap to call — the engine resolves
/// on every operation rather than caching, so a revoked identity stops
/// authorizing immediately.
pub trait IdentityOracle: Send + Sync {
    /// Resolve a caller handle, or `None` if the oracle does not vouch
    /// for it.
    fn resolve(&self, caller: &CallerHandle) -> Option<PartyIdentity>;
}

/// In-memory identity oracle backed by a registration map.
///
/// Ships for tests and local tooling; a production deployment would back
/// the trait with its identity provider.
#[derive(Debug, Default)]
pub struct StaticIdentityOracle {
    identities: DashMap<String, PartyIdentity>,
}

impl StaticIdentityOracle {
    /// Create an empty oracle.
    pub fn new() -> Self {
        Self {
            identities: DashMap::new(),
        }
    }

    /// Register an identity under a caller handle. A later registration
    /// for the same handle replaces the earlier one.
    pub fn register(&self, handle: CallerHandle, identity: PartyIdentity) {
        self.identities.insert(handle.as_str().to_string(), identity);
    }

    /// Remove a handle's registration, revoking its authority.
    pub fn revoke(&self, handle: &CallerHandle) {
        self.identities.remove(handle.as_str());
    }
}

impl IdentityOracle for StaticIdentityOracle {
    fn resolve(&self, caller: &CallerHandle) -> Option<PartyIdentity> {
        self.identities.get(caller.as_str()).map(|r| r.value().clone())
    }
}
