//! # Player Auth Service
//!
//! Application service layer that implements the `PlayerAuthApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`PlayerAuthApi`)
//! - Uses the outbound port (`Clock`) for expiry checks
//! - Delegates cryptographic operations to the domain layer
//!
//! ## Pipeline
//!
//! 1. Decode the owner identifier and the base64 fields
//! 2. Check the root attestation of the player key (nothing about the key is
//!    parsed or trusted before this succeeds)
//! 3. Decode the player key and check the payload signature
//! 4. Return the canonical owner identifier

use crate::adapters::clock::SystemClock;
use crate::adapters::fields::AuthFields;
use crate::domain::attestation::KeyAttestationVerifier;
use crate::domain::config::VerifierConfig;
use crate::domain::encoding::decode_base64;
use crate::domain::entities::{BatchVerificationResult, VerificationRequest, VerifiedPlayer};
use crate::domain::errors::AuthError;
use crate::domain::owner_id::OwnerId;
use crate::domain::payload::{decode_player_key, PayloadSignatureVerifier};
use crate::domain::trust_anchor::TrustAnchor;
use crate::ports::inbound::PlayerAuthApi;
use crate::ports::outbound::Clock;
use std::collections::HashMap;
use std::hash::BuildHasher;
use tracing::debug;

/// Player identity verification service.
///
/// Holds only immutable state, so one instance can be shared across threads.
pub struct PlayerAuthService<C: Clock = SystemClock> {
    attestation: KeyAttestationVerifier,
    payload: PayloadSignatureVerifier,
    config: VerifierConfig,
    clock: C,
}

impl PlayerAuthService<SystemClock> {
    /// Service trusting the embedded session-service root key.
    pub fn session_service(config: VerifierConfig) -> Result<Self, AuthError> {
        Self::new(TrustAnchor::session_service()?, config, SystemClock)
    }
}

impl<C: Clock> PlayerAuthService<C> {
    /// Create a new service.
    ///
    /// # Arguments
    /// * `anchor` - Root key that attests player keys
    /// * `config` - Expiry policy and wire settings
    /// * `clock` - Time source for expiry checks
    ///
    /// Fails with [`AuthError::InvalidConfig`] if `config` is out of bounds.
    pub fn new(anchor: TrustAnchor, config: VerifierConfig, clock: C) -> Result<Self, AuthError> {
        Ok(Self {
            attestation: KeyAttestationVerifier::with_config(anchor, &config)?,
            payload: PayloadSignatureVerifier::new(),
            config,
            clock,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verify a message given its wire field map and payload chunks.
    ///
    /// Field names are looked up with the configured prefix.
    pub fn verify_fields<S: BuildHasher>(
        &self,
        fields: &HashMap<String, String, S>,
        payload: Vec<Vec<u8>>,
    ) -> Option<String> {
        match AuthFields::from_map(&self.config.message_prefix, fields) {
            Ok(fields) => self.verify(&fields.into_request(payload)),
            Err(e) => {
                debug!(reason = %e, "Player auth fields rejected");
                None
            }
        }
    }

    fn run_pipeline(&self, request: &VerificationRequest) -> Result<VerifiedPlayer, AuthError> {
        let owner = OwnerId::parse_bits(&request.owner_id)?;
        let key_der = decode_field(&request.public_key, "public_key")?;
        let key_signature = decode_field(&request.key_signature, "key_signature")?;

        self.attestation.check_attestation(
            &owner,
            request.expires_at,
            &key_der,
            &key_signature,
            self.clock.now_millis(),
        )?;

        let player_key = decode_player_key(&key_der)?;
        let payload_signature = decode_field(&request.payload_signature, "payload_signature")?;

        // Parsed halves feed the attestation and the result; the payload
        // stream covers the owner text as received.
        self.payload.check_payload(
            &request.owner_id,
            &request.random_value,
            &request.payload,
            &payload_signature,
            &player_key,
        )?;

        Ok(VerifiedPlayer {
            owner,
            key_expires_at: request.expires_at,
        })
    }
}

impl<C: Clock> PlayerAuthApi for PlayerAuthService<C> {
    fn verify(&self, request: &VerificationRequest) -> Option<String> {
        self.verify_detailed(request).ok().map(|player| player.to_string())
    }

    fn verify_detailed(&self, request: &VerificationRequest) -> Result<VerifiedPlayer, AuthError> {
        let result = self.run_pipeline(request);

        match &result {
            Ok(player) => debug!(owner = %player.owner, "Player message verified"),
            Err(e) => debug!(
                owner_id = %request.owner_id,
                reason = %e,
                "Player message rejected"
            ),
        }

        result
    }

    fn batch_verify(&self, requests: &[VerificationRequest]) -> BatchVerificationResult {
        use rayon::prelude::*;

        let results: Vec<Option<String>> = requests.par_iter().map(|r| self.verify(r)).collect();

        BatchVerificationResult::from_results(results)
    }
}

fn decode_field(text: &str, field: &'static str) -> Result<Vec<u8>, AuthError> {
    decode_base64(text).map_err(|_| AuthError::InvalidEncoding { field })
}

// =============================================================================
// TESTS
// =============================================================================
