//! # Owner Identifier
//!
//! The 128-bit player identity, carried on the wire as two signed 64-bit
//! halves (`"<msb>/<lsb>"`) and presented to callers as a canonical
//! hyphenated UUID string.

use super::errors::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Player identity as its most- and least-significant 64-bit halves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId {
    /// Most-significant half
    pub most_significant: i64,
    /// Least-significant half
    pub least_significant: i64,
}

impl OwnerId {
    /// Create an identifier from its two halves.
    pub const fn new(most_significant: i64, least_significant: i64) -> Self {
        Self {
            most_significant,
            least_significant,
        }
    }

    /// Parse the wire form `"<msb>/<lsb>"`.
    pub fn parse_bits(text: &str) -> Result<Self, AuthError> {
        let invalid = || AuthError::InvalidOwnerId(text.to_string());

        let (msb, lsb) = text.split_once('/').ok_or_else(invalid)?;
        let most_significant = msb.parse::<i64>().map_err(|_| invalid())?;
        let least_significant = lsb.parse::<i64>().map_err(|_| invalid())?;

        Ok(Self::new(most_significant, least_significant))
    }

    /// Parse the canonical hyphenated form.
    pub fn parse_hyphenated(text: &str) -> Result<Self, AuthError> {
        let uuid = Uuid::parse_str(text).map_err(|_| AuthError::InvalidOwnerId(text.to_string()))?;
        Ok(Self::from(uuid))
    }

    /// The wire form `"<msb>/<lsb>"`, which is also the first element of the
    /// payload signature stream.
    pub fn bits_text(&self) -> String {
        format!("{}/{}", self.most_significant, self.least_significant)
    }

    /// The canonical 8-4-4-4-12 lowercase hex form.
    pub fn to_hyphenated(&self) -> String {
        format_hyphenated(self.most_significant, self.least_significant)
    }

    /// Convert to a `Uuid`.
    pub fn to_uuid(&self) -> Uuid {
        Uuid::from_u64_pair(self.most_significant as u64, self.least_significant as u64)
    }
}

/// Format two 64-bit halves as a canonical UUID string.
///
/// Groups: msb bits 63..32, 31..16, 15..0; lsb bits 63..48, 47..0.
pub fn format_hyphenated(most_significant: i64, least_significant: i64) -> String {
    let msb = most_significant as u64;
    let lsb = least_significant as u64;

    format!(
        "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
        msb >> 32,
        (msb >> 16) & 0xFFFF,
        msb & 0xFFFF,
        lsb >> 48,
        lsb & 0xFFFF_FFFF_FFFF,
    )
}

impl From<Uuid> for OwnerId {
    fn from(uuid: Uuid) -> Self {
        let (msb, lsb) = uuid.as_u64_pair();
        Self::new(msb as i64, lsb as i64)
    }
}

impl From<OwnerId> for Uuid {
    fn from(id: OwnerId) -> Self {
        id.to_uuid()
    }
}

impl FromStr for OwnerId {
    type Err = AuthError;

    /// Accepts either the wire form or the hyphenated form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains('/') {
            Self::parse_bits(s)
        } else {
            Self::parse_hyphenated(s)
        }
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hyphenated())
    }
}
