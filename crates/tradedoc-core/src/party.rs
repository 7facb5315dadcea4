//! # Party Roles and Identities
//!
//! A [`PartyRole`] is a position relative to one document — the same
//! organization can be the seller on one transaction and the buyer on
//! another. Roles are derived by comparing a resolved [`PartyId`](crate::PartyId)
//! against the parties recorded on the document, never taken from caller
//! input.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::identity::PartyId;

/// The role a party holds with respect to a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyRole {
    /// The purchasing counterparty named on the order.
    Buyer,
    /// The counterparty that initiates the order and issues the invoice.
    Seller,
    /// The counterparty that takes custody of the goods for shipment.
    Carrier,
}

impl PartyRole {
    /// Returns all roles in canonical order.
    pub fn all_roles() -> &'static [PartyRole] {
        &[Self::Buyer, Self::Seller, Self::Carrier]
    }

    /// Returns the snake_case string identifier for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Seller => "seller",
            Self::Carrier => "carrier",
        }
    }
}

impl std::fmt::Display for PartyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartyRole {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(Self::Buyer),
            "seller" => Ok(Self::Seller),
            "carrier" => Ok(Self::Carrier),
            other => Err(crate::error::ValidationError::Unknown {
                field: "party role",
                value: other.to_string(),
            }),
        }
    }
}

/// A verified counterparty identity, as resolved by the identity oracle.
///
/// Holds the stable [`PartyId`] that document records store, plus display
/// metadata. Possession of a `PartyIdentity` means the oracle vouched for
/// the caller — engine code never constructs one from raw caller input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyIdentity {
    /// Stable party identifier recorded on documents.
    pub party_id: PartyId,
    /// Registered legal name, if known.
    pub legal_name: Option<String>,
}

impl PartyIdentity {
    /// Create an identity with no display metadata.
    pub fn new(party_id: PartyId) -> Self {
        Self {
            party_id,
            legal_name: None,
        }
    }

    /// Create an identity carrying a registered legal name.
    pub fn named(party_id: PartyId, legal_name: impl Into<String>) -> Self {
        Self {
            party_id,
            legal_name: Some(legal_name.into()),
        }
    }
}
