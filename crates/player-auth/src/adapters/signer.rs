//! # Message Signer
//!
//! Client half of the wire protocol. Holds a player key pair together with
//! the session service's attestation of it, and turns payload chunks into the
//! [`AuthFields`] a verifier consumes.
//!
//! Obtaining the key pair and attestation from the session service is out of
//! scope; callers supply them.

use super::fields::AuthFields;
use crate::domain::errors::AuthError;
use crate::domain::owner_id::OwnerId;
use crate::domain::payload::sign_payload_stream;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rand::Rng;
use rsa::pkcs8::EncodePublicKey;
use rsa::RsaPrivateKey;
use std::fmt;
use tracing::debug;

/// Signs outgoing messages with an attested player key.
#[derive(Clone)]
pub struct MessageSigner {
    owner: OwnerId,
    private_key: RsaPrivateKey,
    /// Base64 DER of the public half, as attested
    public_key: String,
    expires_at: i64,
    /// Base64 attestation signature from the session service
    key_signature: String,
}

impl MessageSigner {
    /// Create a signer for `owner`.
    ///
    /// # Arguments
    /// * `private_key` - The player's private key
    /// * `expires_at` - Attested expiry of the public half, millis
    /// * `key_signature` - The session service's attestation signature
    pub fn new(
        owner: OwnerId,
        private_key: RsaPrivateKey,
        expires_at: i64,
        key_signature: &[u8],
    ) -> Result<Self, AuthError> {
        let der = private_key
            .to_public_key()
            .to_public_key_der()
            .map_err(|_| AuthError::MalformedPublicKey)?;

        Ok(Self {
            owner,
            public_key: BASE64.encode(der.as_bytes()),
            private_key,
            expires_at,
            key_signature: BASE64.encode(key_signature),
        })
    }

    /// The owner messages are signed for.
    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Sign `chunks` under a fresh random value from the OS generator.
    pub fn sign<C: AsRef<[u8]>>(&self, chunks: &[C]) -> Result<AuthFields, AuthError> {
        self.sign_with_random(OsRng.gen::<i64>(), chunks)
    }

    /// Sign `chunks` under a caller-chosen random value.
    pub fn sign_with_random<C: AsRef<[u8]>>(
        &self,
        random_value: i64,
        chunks: &[C],
    ) -> Result<AuthFields, AuthError> {
        let owner_id = self.owner.bits_text();
        let random_value = random_value.to_string();
        let signature =
            sign_payload_stream(&self.private_key, &owner_id, random_value.as_bytes(), chunks)?;

        debug!(owner = %self.owner, chunks = chunks.len(), "Player message signed");

        Ok(AuthFields {
            owner_id,
            random_value,
            public_key: self.public_key.clone(),
            expires_at: self.expires_at,
            key_signature: self.key_signature.clone(),
            payload_signature: BASE64.encode(signature),
        })
    }
}

impl fmt::Debug for MessageSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageSigner")
            .field("owner", &self.owner)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_helpers::{attest, player_key, public_key_der, root_key, FAR_FUTURE_EXPIRY};

    fn signer(owner: OwnerId) -> MessageSigner {
        let signature = attest(root_key(), &owner, FAR_FUTURE_EXPIRY, &public_key_der(player_key()));
        MessageSigner::new(owner, player_key().clone(), FAR_FUTURE_EXPIRY, &signature).unwrap()
    }

    #[test]
    fn test_fields_carry_attestation_material() {
        let owner = OwnerId::new(-5, 7);
        let fields = signer(owner).sign_with_random(-42, &["hi"]).unwrap();

        assert_eq!(fields.owner_id, "-5/7");
        assert_eq!(fields.random_value, "-42");
        assert_eq!(fields.expires_at, FAR_FUTURE_EXPIRY);
        assert_eq!(
            BASE64.decode(&fields.public_key).unwrap(),
            public_key_der(player_key())
        );
        assert_eq!(
            BASE64.decode(&fields.key_signature).unwrap(),
            attest(root_key(), &owner, FAR_FUTURE_EXPIRY, &public_key_der(player_key()))
        );
    }

    #[test]
    fn test_fresh_random_value_per_message() {
        let signer = signer(OwnerId::new(1, 2));
        let a = signer.sign(&["hello"]).unwrap();
        let b = signer.sign(&["hello"]).unwrap();

        assert!(a.random_value.parse::<i64>().is_ok());
        assert_ne!(a.random_value, b.random_value);
        assert_ne!(a.payload_signature, b.payload_signature);
    }

    #[test]
    fn test_debug_omits_private_key() {
        let text = format!("{:?}", signer(OwnerId::new(1, 2)));
        assert!(text.contains("MessageSigner"));
        assert!(!text.contains("private_key"));
    }
}
