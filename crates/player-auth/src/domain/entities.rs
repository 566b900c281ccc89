//! # Domain Entities
//!
//! Request and result types for trust-chain verification.

use super::owner_id::OwnerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything a client sends to prove a message came from a given player.
///
/// Text fields are kept exactly as received; decoding happens inside the
/// pipeline so that malformed input is just another verification failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Owner identifier in wire form, `"<msb>/<lsb>"`
    pub owner_id: String,
    /// Client-chosen random value mixed into the payload stream
    pub random_value: Vec<u8>,
    /// Base64 RSA/SHA-256 signature by the player key over the payload stream
    pub payload_signature: String,
    /// Player key expiry, milliseconds since the Unix epoch
    pub expires_at: i64,
    /// Base64 DER SubjectPublicKeyInfo of the player key
    pub public_key: String,
    /// Base64 RSA/SHA-1 signature by the trust anchor over the attestation
    pub key_signature: String,
    /// Payload chunks, in signing order
    pub payload: Vec<Vec<u8>>,
}

/// A player whose message passed both stages of the trust chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedPlayer {
    /// The attested owner
    pub owner: OwnerId,
    /// Expiry of the attested player key
    pub key_expires_at: i64,
}

impl fmt::Display for VerifiedPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.owner, f)
    }
}

/// Result of batch verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchVerificationResult {
    /// Canonical identifier per request, in input order
    pub results: Vec<Option<String>>,
    /// Count of requests that verified
    pub valid_count: usize,
    /// Count of requests that did not
    pub invalid_count: usize,
}

impl BatchVerificationResult {
    /// Create a batch result from individual outcomes.
    pub fn from_results(results: Vec<Option<String>>) -> Self {
        let valid_count = results.iter().filter(|r| r.is_some()).count();
        let invalid_count = results.len() - valid_count;

        Self {
            results,
            valid_count,
            invalid_count,
        }
    }

    /// Whether every request verified.
    pub fn all_valid(&self) -> bool {
        self.invalid_count == 0
    }
}
