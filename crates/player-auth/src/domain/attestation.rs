//! # Key Attestation
//!
//! First stage of the trust chain: the trust anchor's RSA/SHA-1 signature
//! binding a player key to an owner and an expiry.
//!
//! ## Expiry
//!
//! The deployed counterpart evaluates `!expiry < now`, which negates the
//! timestamp instead of the comparison and therefore always passes. Whether
//! that is reproduced is an explicit [`ExpiryPolicy`]; the default enforces
//! `expiry + skew > now`.

use super::config::{ConfigError, ExpiryPolicy, VerifierConfig};
use super::encoding::attestation_message;
use super::errors::AuthError;
use super::owner_id::OwnerId;
use super::trust_anchor::TrustAnchor;

/// Checks root attestations of player keys.
#[derive(Clone, Debug)]
pub struct KeyAttestationVerifier {
    anchor: TrustAnchor,
    expiry_policy: ExpiryPolicy,
    clock_skew_ms: i64,
}

impl KeyAttestationVerifier {
    /// Create a verifier that enforces expiry with no skew.
    pub fn new(anchor: TrustAnchor) -> Self {
        Self {
            anchor,
            expiry_policy: ExpiryPolicy::Enforce,
            clock_skew_ms: 0,
        }
    }

    /// Create a verifier using the expiry settings of `config`.
    ///
    /// Fails if `config` does not pass [`VerifierConfig::validate`].
    pub fn with_config(anchor: TrustAnchor, config: &VerifierConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            anchor,
            expiry_policy: config.expiry_policy,
            clock_skew_ms: i64::try_from(config.clock_skew_ms).unwrap_or(i64::MAX),
        })
    }

    /// The trust anchor in use.
    pub fn anchor(&self) -> &TrustAnchor {
        &self.anchor
    }

    /// The expiry policy in use.
    pub fn expiry_policy(&self) -> ExpiryPolicy {
        self.expiry_policy
    }

    /// Check that the anchor attested `key_der` for `owner` until `expires_at`,
    /// and that the attestation is still live at `now` (per policy).
    ///
    /// The signature is checked before the expiry so that an unsigned claim
    /// never learns anything about the clock.
    pub fn check_attestation(
        &self,
        owner: &OwnerId,
        expires_at: i64,
        key_der: &[u8],
        signature: &[u8],
        now: i64,
    ) -> Result<(), AuthError> {
        let message = attestation_message(owner, expires_at, key_der);
        self.anchor.check_root_signature(&message, signature)?;
        self.check_expiry(expires_at, now)
    }

    /// Boolean form of [`check_attestation`](Self::check_attestation).
    pub fn verify_attestation(
        &self,
        owner: &OwnerId,
        expires_at: i64,
        key_der: &[u8],
        signature: &[u8],
        now: i64,
    ) -> bool {
        self.check_attestation(owner, expires_at, key_der, signature, now)
            .is_ok()
    }

    fn check_expiry(&self, expires_at: i64, now: i64) -> Result<(), AuthError> {
        match self.expiry_policy {
            ExpiryPolicy::Legacy => Ok(()),
            ExpiryPolicy::Enforce => {
                if expires_at.saturating_add(self.clock_skew_ms) > now {
                    Ok(())
                } else {
                    Err(AuthError::KeyExpired { expires_at, now })
                }
            }
        }
    }
}
