//! # Document Kind Discriminator
//!
//! One registry holds all three document kinds, correlated by id. The
//! [`DocumentKind`] discriminator replaces the separate identifier spaces
//! a per-document-type store would need.

use serde::{Deserialize, Serialize};

/// The kind of a document record within a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// The initiating purchase order.
    Order,
    /// The commercial invoice derived from the order.
    Invoice,
    /// The bill of lading derived from the invoice.
    Lading,
}

impl DocumentKind {
    /// Returns the snake_case string identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Invoice => "invoice",
            Self::Lading => "lading",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
