//! # Trade Term Table — Single Source of Truth
//!
//! Defines the [`TradeTerm`] enum with all 11 Incoterms rules. This is the
//! one definition used across the stack. Every `match` on `TradeTerm` must
//! be exhaustive — adding a rule forces every consumer to handle it at
//! compile time.
//!
//! Each rule maps to a fixed pair of [`TransferPoint`]s on the shipment
//! path (origin → carrier handoff → destination): the point where risk of
//! loss passes from seller to buyer, and the point up to which the seller
//! carries the cost of carriage.
//!
//! # Rules
//!
//! | # | Rule | Risk transfer | Cost allocation |
//! |---|------|---------------|-----------------|
//! |  1 | EXW | Origin | Origin |
//! |  2 | FCA | Carrier handoff | Carrier handoff |
//! |  3 | CPT | Carrier handoff | Destination |
//! |  4 | CIP | Carrier handoff | Destination |
//! |  5 | DAP | Destination | Destination |
//! |  6 | DPU | Destination | Destination |
//! |  7 | DDP | Destination | Destination |
//! |  8 | FAS | Carrier handoff | Carrier handoff |
//! |  9 | FOB | Carrier handoff | Carrier handoff |
//! | 10 | CFR | Carrier handoff | Destination |
//! | 11 | CIF | Carrier handoff | Destination |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use tradedoc_core::ValidationError;

// ---------------------------------------------------------------------------
// Transfer points
// ---------------------------------------------------------------------------

/// A point on the shipment path at which a responsibility shifts between
/// seller and buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferPoint {
    /// The seller's premises — responsibility shifts before carriage begins.
    Origin,
    /// Delivery into the carrier's custody.
    CarrierHandoff,
    /// The named destination — the seller carries responsibility to the end.
    Destination,
}

impl TransferPoint {
    /// Returns the snake_case string identifier for this point.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::CarrierHandoff => "carrier_handoff",
            Self::Destination => "destination",
        }
    }
}

impl std::fmt::Display for TransferPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Trade terms
// ---------------------------------------------------------------------------

/// The 11 Incoterms rules.
///
/// Variant order follows the published rule ordering: the seven rules for
/// any mode of transport (EXW through DDP), then the four sea and inland
/// waterway rules (FAS through CIF).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeTerm {
    /// Ex Works — buyer takes over at the seller's premises.
    Exw,
    /// Free Carrier — seller delivers to the buyer's nominated carrier.
    Fca,
    /// Carriage Paid To — seller pays carriage; risk passes at handoff.
    Cpt,
    /// Carriage and Insurance Paid To — CPT plus seller-arranged insurance.
    Cip,
    /// Delivered At Place — seller bears risk and cost to destination.
    Dap,
    /// Delivered at Place Unloaded — DAP including unloading.
    Dpu,
    /// Delivered Duty Paid — DAP including import clearance.
    Ddp,
    /// Free Alongside Ship — seller delivers alongside the vessel.
    Fas,
    /// Free On Board — seller delivers on board the vessel.
    Fob,
    /// Cost and Freight — seller pays freight; risk passes on board.
    Cfr,
    /// Cost, Insurance and Freight — CFR plus seller-arranged insurance.
    Cif,
}

/// Total number of Incoterms rules. Used for table-completeness assertions.
pub const TRADE_TERM_COUNT: usize = 11;

impl TradeTerm {
    /// Returns all 11 rules in canonical order.
    pub fn all_terms() -> &'static [TradeTerm] {
        &[
            Self::Exw,
            Self::Fca,
            Self::Cpt,
            Self::Cip,
            Self::Dap,
            Self::Dpu,
            Self::Ddp,
            Self::Fas,
            Self::Fob,
            Self::Cfr,
            Self::Cif,
        ]
    }

    /// The point at which risk of loss passes from seller to buyer.
    pub fn risk_transfer(&self) -> TransferPoint {
        match self {
            Self::Exw => TransferPoint::Origin,
            Self::Fca | Self::Fas | Self::Fob => TransferPoint::CarrierHandoff,
            Self::Cpt | Self::Cip | Self::Cfr | Self::Cif => TransferPoint::CarrierHandoff,
            Self::Dap | Self::Dpu | Self::Ddp => TransferPoint::Destination,
        }
    }

    /// The point up to which the seller bears the cost of carriage.
    ///
    /// For the C-group rules this deliberately differs from the risk point:
    /// the seller pays for main carriage the buyer already bears the risk of.
    pub fn cost_allocation(&self) -> TransferPoint {
        match self {
            Self::Exw => TransferPoint::Origin,
            Self::Fca | Self::Fas | Self::Fob => TransferPoint::CarrierHandoff,
            Self::Cpt | Self::Cip | Self::Cfr | Self::Cif => TransferPoint::Destination,
            Self::Dap | Self::Dpu | Self::Ddp => TransferPoint::Destination,
        }
    }

    /// Returns the three-letter rule code (e.g. `"FOB"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exw => "EXW",
            Self::Fca => "FCA",
            Self::Cpt => "CPT",
            Self::Cip => "CIP",
            Self::Dap => "DAP",
            Self::Dpu => "DPU",
            Self::Ddp => "DDP",
            Self::Fas => "FAS",
            Self::Fob => "FOB",
            Self::Cfr => "CFR",
            Self::Cif => "CIF",
        }
    }
}

impl std::fmt::Display for TradeTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeTerm {
    type Err = ValidationError;

    /// Parse a rule from its three-letter code, as produced by
    /// [`TradeTerm::as_str()`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EXW" => Ok(Self::Exw),
            "FCA" => Ok(Self::Fca),
            "CPT" => Ok(Self::Cpt),
            "CIP" => Ok(Self::Cip),
            "DAP" => Ok(Self::Dap),
            "DPU" => Ok(Self::Dpu),
            "DDP" => Ok(Self::Ddp),
            "FAS" => Ok(Self::Fas),
            "FOB" => Ok(Self::Fob),
            "CFR" => Ok(Self::Cfr),
            "CIF" => Ok(Self::Cif),
            other => Err(ValidationError::Unknown {
                field: "trade term",
                value: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
