//! Fuzz target for the verification pipeline.
//!
//! Arbitrary field contents must never panic and never verify against the
//! embedded root key.
//!
//! ## Running
//!
//! ```bash
//! cd crates/player-auth
//! cargo +nightly fuzz run fuzz_verify
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use player_auth::{PlayerAuthApi, PlayerAuthService, VerificationRequest, VerifierConfig};
use std::sync::OnceLock;

/// Fuzz input structure for pipeline verification.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    owner_id: String,
    random_value: Vec<u8>,
    payload_signature: String,
    expires_at: i64,
    public_key: String,
    key_signature: String,
    payload: Vec<Vec<u8>>,
}

fn service() -> &'static PlayerAuthService {
    static SERVICE: OnceLock<PlayerAuthService> = OnceLock::new();
    SERVICE.get_or_init(|| {
        PlayerAuthService::session_service(VerifierConfig::default())
            .expect("embedded root key must parse")
    })
}

fuzz_target!(|input: FuzzInput| {
    let request = VerificationRequest {
        owner_id: input.owner_id,
        random_value: input.random_value,
        payload_signature: input.payload_signature,
        expires_at: input.expires_at,
        public_key: input.public_key,
        key_signature: input.key_signature,
        payload: input.payload,
    };

    // Must never panic, regardless of input
    let result = service().verify(&request);

    // Forging a root signature is out of reach for a fuzzer
    assert!(result.is_none());

    // Deterministic
    assert_eq!(result, service().verify(&request));
});
