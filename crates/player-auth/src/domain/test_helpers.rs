//! # Test Helpers
//!
//! Key material and signing for tests, benches and downstream crates
//! (`test-utils` feature). Key generation is slow, so each role's key is
//! generated once per process.

use super::encoding::attestation_message;
use super::entities::VerificationRequest;
use super::owner_id::OwnerId;
use super::payload::sign_payload_stream;
use super::trust_anchor::TrustAnchor;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rsa::pkcs8::EncodePublicKey;
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha1::{Digest, Sha1};
use std::sync::OnceLock;

/// Modulus size of generated test keys.
pub const TEST_KEY_BITS: usize = 1024;

/// Expiry used by the reference scenario (far future, in millis).
pub const FAR_FUTURE_EXPIRY: i64 = 9_999_999_999_999;

/// Generate a fresh RSA key pair.
pub fn generate_key() -> RsaPrivateKey {
    RsaPrivateKey::new(&mut rand::thread_rng(), TEST_KEY_BITS).expect("key generation failed")
}

fn cached(cell: &'static OnceLock<RsaPrivateKey>) -> &'static RsaPrivateKey {
    cell.get_or_init(generate_key)
}

/// Stand-in for the session service's root key.
pub fn root_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    cached(&KEY)
}

/// A player key that the test root attests.
pub fn player_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    cached(&KEY)
}

/// A key the root never attests.
pub fn rogue_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    cached(&KEY)
}

/// Trust anchor for [`root_key`].
pub fn test_anchor() -> TrustAnchor {
    TrustAnchor::from_key(root_key().to_public_key())
}

/// DER SubjectPublicKeyInfo of a key's public half.
pub fn public_key_der(key: &RsaPrivateKey) -> Vec<u8> {
    key.to_public_key()
        .to_public_key_der()
        .expect("public key encoding failed")
        .as_bytes()
        .to_vec()
}

/// RSA/SHA-1 signature over `message`.
pub fn sign_sha1(key: &RsaPrivateKey, message: &[u8]) -> Vec<u8> {
    key.sign(Pkcs1v15Sign::new::<Sha1>(), &Sha1::digest(message))
        .expect("signing failed")
}

/// Root signature attesting `player_der` for `owner` until `expires_at`.
pub fn attest(root: &RsaPrivateKey, owner: &OwnerId, expires_at: i64, player_der: &[u8]) -> Vec<u8> {
    sign_sha1(root, &attestation_message(owner, expires_at, player_der))
}

/// Player signature over the payload stream, `owner_text` hashed verbatim.
pub fn sign_payload<C: AsRef<[u8]>>(
    player: &RsaPrivateKey,
    owner_text: &str,
    random_value: &[u8],
    chunks: &[C],
) -> Vec<u8> {
    sign_payload_stream(player, owner_text, random_value, chunks).expect("signing failed")
}

/// A fully valid request: owner `1/2`, random value `r`, payload `["hello"]`,
/// player key attested by [`root_key`] until [`FAR_FUTURE_EXPIRY`].
pub fn valid_request() -> VerificationRequest {
    signed_request(
        player_key(),
        OwnerId::new(1, 2),
        b"r",
        vec![b"hello".to_vec()],
        FAR_FUTURE_EXPIRY,
    )
}

/// A request whose key is attested by [`root_key`] and whose payload is
/// signed by `player`.
pub fn signed_request(
    player: &RsaPrivateKey,
    owner: OwnerId,
    random_value: &[u8],
    payload: Vec<Vec<u8>>,
    expires_at: i64,
) -> VerificationRequest {
    signed_request_as(player, &owner.bits_text(), random_value, payload, expires_at)
}

/// Like [`signed_request`], but with the owner text used verbatim on the wire
/// and in the payload stream (for example `"01/2"`).
pub fn signed_request_as(
    player: &RsaPrivateKey,
    owner_text: &str,
    random_value: &[u8],
    payload: Vec<Vec<u8>>,
    expires_at: i64,
) -> VerificationRequest {
    let owner = OwnerId::parse_bits(owner_text).expect("owner text must parse");
    let player_der = public_key_der(player);

    VerificationRequest {
        owner_id: owner_text.to_string(),
        random_value: random_value.to_vec(),
        payload_signature: BASE64.encode(sign_payload(player, owner_text, random_value, &payload)),
        expires_at,
        public_key: BASE64.encode(&player_der),
        key_signature: BASE64.encode(attest(root_key(), &owner, expires_at, &player_der)),
        payload,
    }
}
