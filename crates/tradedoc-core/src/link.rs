//! # Opaque Document Links
//!
//! A [`DocumentLink`] is an external reference to an off-system stored
//! document (a URI, a storage key, a filename). The core stores it and
//! returns it verbatim — it never parses, dereferences, or validates the
//! contents beyond rejecting empty input.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum accepted link length in bytes.
const LINK_MAX_LEN: usize = 2048;

/// Opaque reference to an externally stored document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentLink(String);

impl DocumentLink {
    /// Create a link, rejecting empty or oversized input. The contents are
    /// otherwise opaque.
    pub fn new(link: impl Into<String>) -> Result<Self, ValidationError> {
        let link = link.into();
        if link.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "document link",
            });
        }
        if link.len() > LINK_MAX_LEN {
            return Err(ValidationError::TooLong {
                field: "document link",
                max: LINK_MAX_LEN,
            });
        }
        Ok(Self(link))
    }

    /// Access the link as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
