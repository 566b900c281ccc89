//! # Signed Byte Streams
//!
//! Exact byte layouts covered by the two signatures of the trust chain.
//! A single reordering here silently breaks every deployed client, so the
//! layouts are kept in one place and pinned by tests.

use super::owner_id::OwnerId;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};

/// Protocol version marker mixed into the payload stream (twice: once inside
/// the nonce digest, once in clear).
pub const PROTOCOL_VERSION: &[u8] = b"70";

/// Build the message the trust anchor signs for a player key.
///
/// Layout: `be64(msb) || be64(lsb) || be64(expires_at) || key_der`
pub fn attestation_message(owner: &OwnerId, expires_at: i64, key_der: &[u8]) -> Vec<u8> {
    let mut message = Vec::with_capacity(24 + key_der.len());
    message.extend_from_slice(&owner.most_significant.to_be_bytes());
    message.extend_from_slice(&owner.least_significant.to_be_bytes());
    message.extend_from_slice(&expires_at.to_be_bytes());
    message.extend_from_slice(key_der);
    message
}

/// Base64 text of `SHA-256(random_value || "70")`.
pub fn nonce_digest(random_value: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(random_value);
    hasher.update(PROTOCOL_VERSION);
    BASE64.encode(hasher.finalize())
}

/// Feed the payload stream into a SHA-256 hasher in signing order.
///
/// Order: owner text, nonce digest text, `"70"`, each chunk. The owner text
/// is hashed exactly as it arrived on the wire; `"01/2"` and `"1/2"` name the
/// same owner but sign differently.
pub fn payload_digest<C: AsRef<[u8]>>(owner_text: &str, random_value: &[u8], chunks: &[C]) -> Sha256 {
    let mut hasher = Sha256::new();
    hasher.update(owner_text.as_bytes());
    hasher.update(nonce_digest(random_value).as_bytes());
    hasher.update(PROTOCOL_VERSION);
    for chunk in chunks {
        hasher.update(chunk.as_ref());
    }
    hasher
}

/// Decode a standard-alphabet base64 field.
pub(crate) fn decode_base64(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    BASE64.decode(text.trim())
}
