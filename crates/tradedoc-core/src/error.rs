//! # Validation Errors
//!
//! Construction-time validation failures for the core newtypes. Higher
//! layers define their own error enums and compose this one with `#[from]`.

use thiserror::Error;

/// Error raised when a core newtype rejects its input at construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required string field was empty or whitespace-only.
    #[error("{field} must not be empty")]
    Empty {
        /// Name of the rejected field.
        field: &'static str,
    },

    /// A string field exceeded the maximum accepted length.
    #[error("{field} exceeds {max} bytes")]
    TooLong {
        /// Name of the rejected field.
        field: &'static str,
        /// Maximum accepted length in bytes.
        max: usize,
    },

    /// An input did not match any known value for the field.
    #[error("unknown {field}: {value:?}")]
    Unknown {
        /// Name of the rejected field.
        field: &'static str,
        /// The rejected input.
        value: String,
    },
}
