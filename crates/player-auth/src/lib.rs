//! # Player Auth
//!
//! Verifies signed player-identity messages through a two-stage trust chain:
//!
//! 1. **Key attestation**: the session service's root key signs
//!    `(owner, expiry, player key)` with RSA/SHA-1.
//! 2. **Payload signature**: the attested player key signs
//!    `(owner, nonce digest, "70", payload...)` with RSA/SHA-256.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Byte layouts and signature checks, no I/O
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound interfaces
//! - **Adapters** (`adapters/`): Wire field map, message signer, clocks
//! - **Service Layer** (`service.rs`): The verification pipeline
//!
//! ## Security Notes
//!
//! - **No oracle**: `verify` returns the owner identifier or `None`. The reason
//!   for a rejection is only available through `verify_detailed` and is meant
//!   for server-side logs.
//! - **Attestation first**: the player key is not parsed until the root has
//!   vouched for its exact DER bytes.
//! - **Expiry**: enforced by default; see [`ExpiryPolicy`].

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::clock::{FixedClock, SystemClock};
pub use adapters::fields::AuthFields;
pub use adapters::signer::MessageSigner;
pub use domain::attestation::KeyAttestationVerifier;
pub use domain::config::{ConfigError, ExpiryPolicy, VerifierConfig};
pub use domain::encoding::{attestation_message, nonce_digest, PROTOCOL_VERSION};
pub use domain::entities::{BatchVerificationResult, VerificationRequest, VerifiedPlayer};
pub use domain::errors::AuthError;
pub use domain::owner_id::{format_hyphenated, OwnerId};
pub use domain::payload::{decode_player_key, sign_payload_stream, PayloadSignatureVerifier};
pub use domain::trust_anchor::{TrustAnchor, SESSION_SERVICE_PUBLIC_KEY_PEM};
pub use ports::inbound::PlayerAuthApi;
pub use ports::outbound::Clock;
pub use service::PlayerAuthService;
