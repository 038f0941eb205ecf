use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Name of a party appearing on either side of an obligation.
///
/// Party ids are opaque, case-sensitive tokens compared byte-wise. They
/// carry no structure beyond two constraints inherited from the snapshot
/// format: an id is never empty and never contains whitespace, because the
/// on-disk record line is space-delimited and an id with a space inside it
/// could not round-trip.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(String);

impl PartyId {
    /// Validate and wrap a raw token.
    pub fn new(raw: impl Into<String>) -> Result<Self, TypeError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(TypeError::EmptyPartyId);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(TypeError::WhitespaceInPartyId { id: raw });
        }
        Ok(Self(raw))
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PartyId({})", self.0)
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
