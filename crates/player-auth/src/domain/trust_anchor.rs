//! # Trust Anchor
//!
//! The root authority's RSA public key. Player keys are only trusted once the
//! root has signed them (RSA PKCS#1 v1.5 over SHA-1).
//!
//! The anchor is an ordinary value injected into the verifiers, so tests can
//! substitute their own root. [`TrustAnchor::session_service`] builds the
//! production anchor from the key embedded below.

use super::errors::AuthError;
use rsa::pkcs8::DecodePublicKey;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha1::{Digest, Sha1};

/// Root public key of the session service (4096-bit RSA, SubjectPublicKeyInfo).
pub const SESSION_SERVICE_PUBLIC_KEY_PEM: &str = "-----BEGIN PUBLIC KEY-----
MIICIjANBgkqhkiG9w0BAQEFAAOCAg8AMIICCgKCAgEAylB4B6m5lz7jwrcFz6Fd
/fnfUhcvlxsTSn5kIK/2aGG1C3kMy4VjhwlxF6BFUSnfxhNswPjh3ZitkBxEAFY2
5uzkJFRwHwVA9mdwjashXILtR6OqdLXXFVyUPIURLOSWqGNBtb08EN5fMnG8iFLg
EJIBMxs9BvF3s3/FhuHyPKiVTZmXY0WY4ZyYqvoKR+XjaTRPPvBsDa4WI2u1zxXM
eHlodT3lnCzVvyOYBLXL6CJgByuOxccJ8hnXfF9yY4F0aeL080Jz/3+EBNG8RO4B
yhtBf4Ny8NQ6stWsjfeUIvH7bU/4zCYcYOq4WrInXHqS8qruDmIl7P5XXGcabuzQ
stPf/h2CRAUpP/PlHXcMlvewjmGU6MfDK+lifScNYwjPxRo4nKTGFZf/0aqHCh/E
AsQyLKrOIYRE0lDG3bzBh8ogIMLAugsAfBb6M3mqCqKaTMAf/VAjh5FFJnjS+7bE
+bZEV0qwax1CEoPPJL1fIQjOS8zj086gjpGRCtSy9+bTPTfTR/SJ+VUB5G2IeCIt
kNHpJX2ygojFZ9n5Fnj7R9ZnOM+L8nyIjPu3aePvtcrXlyLhH/hvOfIOjPxOlqW+
O5QwSFP4OEcyLAUgDdUgyW36Z5mB285uKW/ighzZsOTevVUG2QwDItObIV6i8RCx
FbN2oDHyPaO5j1tTaBNyVt8CAwEAAQ==
-----END PUBLIC KEY-----";

/// Immutable root key used to check key attestations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrustAnchor {
    key: RsaPublicKey,
}

impl TrustAnchor {
    /// The production anchor built from [`SESSION_SERVICE_PUBLIC_KEY_PEM`].
    pub fn session_service() -> Result<Self, AuthError> {
        Self::from_pem(SESSION_SERVICE_PUBLIC_KEY_PEM)
    }

    /// Build an anchor from a PEM `PUBLIC KEY` block.
    pub fn from_pem(pem: &str) -> Result<Self, AuthError> {
        let key = RsaPublicKey::from_public_key_pem(pem).map_err(|_| AuthError::MalformedPublicKey)?;
        Ok(Self { key })
    }

    /// Build an anchor from DER-encoded SubjectPublicKeyInfo.
    pub fn from_public_key_der(der: &[u8]) -> Result<Self, AuthError> {
        let key = RsaPublicKey::from_public_key_der(der).map_err(|_| AuthError::MalformedPublicKey)?;
        Ok(Self { key })
    }

    /// Wrap an already-decoded key.
    pub fn from_key(key: RsaPublicKey) -> Self {
        Self { key }
    }

    /// The root public key.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.key
    }

    /// Check an RSA/SHA-1 signature by the root key.
    pub fn check_root_signature(&self, message: &[u8], signature: &[u8]) -> Result<(), AuthError> {
        verify_pkcs1v15(
            &self.key,
            Pkcs1v15Sign::new::<Sha1>(),
            &Sha1::digest(message),
            signature,
            AuthError::AttestationRejected,
        )
    }

    /// Boolean form of [`check_root_signature`](Self::check_root_signature).
    pub fn verify_root_signature(&self, message: &[u8], signature: &[u8]) -> bool {
        self.check_root_signature(message, signature).is_ok()
    }
}

/// PKCS#1 v1.5 verification with a length check up front. A signature of the
/// wrong size is `MalformedSignature`; any other failure is `mismatch`.
pub(crate) fn verify_pkcs1v15(
    key: &RsaPublicKey,
    scheme: Pkcs1v15Sign,
    hashed: &[u8],
    signature: &[u8],
    mismatch: AuthError,
) -> Result<(), AuthError> {
    if signature.len() != key.size() {
        return Err(AuthError::MalformedSignature);
    }

    key.verify(scheme, hashed, signature).map_err(|_| mismatch)
}
