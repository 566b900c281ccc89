//! # Verification Errors
//!
//! Error types for the player identity trust chain.
//!
//! These never cross the public `verify` boundary: the pipeline collapses every
//! variant into a single "no result" so an untrusted caller cannot use the
//! failure reason as an oracle. They exist for server-side logging and for
//! callers of `verify_detailed`.

use super::config::ConfigError;
use thiserror::Error;

/// Errors that can occur while verifying a signed player message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// A base64 field could not be decoded
    #[error("Invalid base64 encoding in {field}")]
    InvalidEncoding { field: &'static str },

    /// The owner identifier is not of the form `<i64>/<i64>`
    #[error("Invalid owner identifier: {0}")]
    InvalidOwnerId(String),

    /// The candidate or root key is not a valid DER/PEM RSA public key
    #[error("Malformed RSA public key")]
    MalformedPublicKey,

    /// The signature could not be checked (wrong length, not an RSA block)
    #[error("Malformed signature")]
    MalformedSignature,

    /// The trust anchor did not endorse the candidate key
    #[error("Key attestation rejected by trust anchor")]
    AttestationRejected,

    /// The attested key is past its expiry
    #[error("Player key expired at {expires_at} (now {now})")]
    KeyExpired { expires_at: i64, now: i64 },

    /// The candidate key did not sign the payload
    #[error("Payload signature rejected")]
    PayloadRejected,

    /// A required wire field was absent
    #[error("Missing field: {0}")]
    MissingField(String),

    /// An integer wire field was not a decimal i64
    #[error("Invalid integer in {field}: {value}")]
    InvalidInteger { field: String, value: String },

    /// The wire message itself could not be parsed
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// The player key could not sign an outgoing message
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// The verifier configuration is out of bounds
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
