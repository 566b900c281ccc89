//! # Payload Signature
//!
//! Second stage of the trust chain: the player key's RSA/SHA-256 signature
//! over the owner, the nonce digest, the protocol marker and the payload.
//! Only call this with a key that has already passed attestation.

use super::encoding::payload_digest;
use super::errors::AuthError;
use super::trust_anchor::verify_pkcs1v15;
use rsa::pkcs8::DecodePublicKey;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

/// Checks payload signatures made by attested player keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct PayloadSignatureVerifier;

impl PayloadSignatureVerifier {
    /// Create a new payload verifier.
    pub fn new() -> Self {
        Self
    }

    /// Check `signature` over the payload stream with `player_key`.
    ///
    /// `owner_text` is the owner identifier exactly as received.
    pub fn check_payload<C: AsRef<[u8]>>(
        &self,
        owner_text: &str,
        random_value: &[u8],
        chunks: &[C],
        signature: &[u8],
        player_key: &RsaPublicKey,
    ) -> Result<(), AuthError> {
        let hashed = payload_digest(owner_text, random_value, chunks).finalize();

        verify_pkcs1v15(
            player_key,
            Pkcs1v15Sign::new::<Sha256>(),
            &hashed,
            signature,
            AuthError::PayloadRejected,
        )
    }

    /// Boolean form of [`check_payload`](Self::check_payload).
    pub fn verify_payload<C: AsRef<[u8]>>(
        &self,
        owner_text: &str,
        random_value: &[u8],
        chunks: &[C],
        signature: &[u8],
        player_key: &RsaPublicKey,
    ) -> bool {
        self.check_payload(owner_text, random_value, chunks, signature, player_key)
            .is_ok()
    }
}

/// Sign the payload stream with a player's private key.
///
/// This is the client half of [`PayloadSignatureVerifier::check_payload`].
pub fn sign_payload_stream<C: AsRef<[u8]>>(
    player_key: &RsaPrivateKey,
    owner_text: &str,
    random_value: &[u8],
    chunks: &[C],
) -> Result<Vec<u8>, AuthError> {
    let hashed = payload_digest(owner_text, random_value, chunks).finalize();

    player_key
        .sign(Pkcs1v15Sign::new::<Sha256>(), &hashed)
        .map_err(|e| AuthError::SigningFailed(e.to_string()))
}

/// Decode an attested player key from DER SubjectPublicKeyInfo.
pub fn decode_player_key(der: &[u8]) -> Result<RsaPublicKey, AuthError> {
    RsaPublicKey::from_public_key_der(der).map_err(|_| AuthError::MalformedPublicKey)
}
