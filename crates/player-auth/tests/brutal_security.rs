//! # Brutal Security Tests for Player Auth
//!
//! These tests attempt to break the trust chain from outside the crate,
//! through the public API only.
//!
//! ## Test Categories
//!
//! 1. **Tampering** - Single-byte mutations of every signed input
//! 2. **Untrusted Keys** - Self-signed keys, key substitution
//! 3. **Malformed Input** - Bad base64, truncated DER, wrong-length signatures
//! 4. **Concurrency** - Shared service under parallel load

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use player_auth::domain::test_helpers::{
    attest, player_key, public_key_der, rogue_key, root_key, sign_payload, signed_request,
    signed_request_as, test_anchor, valid_request, FAR_FUTURE_EXPIRY,
};
use player_auth::{
    FixedClock, MessageSigner, OwnerId, PlayerAuthApi, PlayerAuthService, VerificationRequest,
    VerifierConfig,
};
use std::collections::HashMap;
use std::sync::Arc;

// =============================================================================
// TEST HELPERS
// =============================================================================

const NOW: i64 = 1_700_000_000_000;
const EXPECTED: &str = "00000000-0000-0001-0000-000000000002";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn make_service() -> PlayerAuthService<FixedClock> {
    init_tracing();
    PlayerAuthService::new(test_anchor(), VerifierConfig::default(), FixedClock(NOW)).unwrap()
}

fn flip_base64_byte(text: &str, index: usize) -> String {
    let mut bytes = BASE64.decode(text).unwrap();
    let i = index % bytes.len();
    bytes[i] ^= 0x01;
    BASE64.encode(bytes)
}

// =============================================================================
// TAMPERING
// =============================================================================

#[test]
fn test_reference_scenario_end_to_end() {
    let service = make_service();
    assert_eq!(service.verify(&valid_request()).as_deref(), Some(EXPECTED));
}

#[test]
fn test_payload_byte_mutations_rejected() {
    let service = make_service();
    let request = valid_request();

    for i in 0..request.payload[0].len() {
        let mut tampered = request.clone();
        tampered.payload[0][i] ^= 0x20;
        assert_eq!(service.verify(&tampered), None, "payload byte {i}");
    }
}

#[test]
fn test_random_value_mutation_rejected() {
    let service = make_service();
    let mut request = valid_request();
    request.random_value[0] ^= 0x01;

    assert_eq!(service.verify(&request), None);
}

#[test]
fn test_payload_signature_mutations_rejected() {
    let service = make_service();
    let request = valid_request();

    for i in (0..128).step_by(7) {
        let mut tampered = request.clone();
        tampered.payload_signature = flip_base64_byte(&request.payload_signature, i);
        assert_eq!(service.verify(&tampered), None, "signature byte {i}");
    }
}

#[test]
fn test_key_signature_mutations_rejected() {
    let service = make_service();
    let request = valid_request();

    for i in (0..128).step_by(7) {
        let mut tampered = request.clone();
        tampered.key_signature = flip_base64_byte(&request.key_signature, i);
        assert_eq!(service.verify(&tampered), None, "attestation byte {i}");
    }
}

#[test]
fn test_owner_and_expiry_mutations_rejected() {
    let service = make_service();

    let mut request = valid_request();
    request.owner_id = "1/3".to_string();
    assert_eq!(service.verify(&request), None);

    let mut request = valid_request();
    request.owner_id = "0/2".to_string();
    assert_eq!(service.verify(&request), None);

    let mut request = valid_request();
    request.expires_at += 1;
    assert_eq!(service.verify(&request), None);
}

#[test]
fn test_owner_text_is_not_normalized() {
    let service = make_service();

    // Signed over "1/2", resent as "01/+2": same halves, different signed text
    let mut request = valid_request();
    request.owner_id = "01/+2".to_string();
    assert_eq!(service.verify(&request), None);

    // Signed over the text actually sent
    let request = signed_request_as(
        player_key(),
        "01/+2",
        b"r",
        vec![b"hello".to_vec()],
        FAR_FUTURE_EXPIRY,
    );
    assert_eq!(service.verify(&request).as_deref(), Some(EXPECTED));
}

#[test]
fn test_swapped_chunks_rejected() {
    let service = make_service();
    let request = signed_request(
        player_key(),
        OwnerId::new(1, 2),
        b"r",
        vec![b"first".to_vec(), b"second".to_vec()],
        FAR_FUTURE_EXPIRY,
    );
    assert_eq!(service.verify(&request).as_deref(), Some(EXPECTED));

    let mut swapped = request.clone();
    swapped.payload.swap(0, 1);
    assert_eq!(service.verify(&swapped), None);
}

// =============================================================================
// UNTRUSTED KEYS
// =============================================================================

#[test]
fn test_self_attested_key_rejected() {
    let service = make_service();
    let owner = OwnerId::new(1, 2);
    let rogue_der = public_key_der(rogue_key());

    // Rogue key attests itself and signs a consistent payload
    let request = VerificationRequest {
        owner_id: owner.bits_text(),
        random_value: b"r".to_vec(),
        payload_signature: BASE64.encode(sign_payload(rogue_key(), "1/2", b"r", &["hello"])),
        expires_at: FAR_FUTURE_EXPIRY,
        public_key: BASE64.encode(&rogue_der),
        key_signature: BASE64.encode(attest(rogue_key(), &owner, FAR_FUTURE_EXPIRY, &rogue_der)),
        payload: vec![b"hello".to_vec()],
    };

    assert_eq!(service.verify(&request), None);
}

#[test]
fn test_attestation_for_other_owner_not_transferable() {
    let service = make_service();
    let attested_for = OwnerId::new(9, 9);
    let claimed = OwnerId::new(1, 2);
    let der = public_key_der(player_key());

    let request = VerificationRequest {
        owner_id: claimed.bits_text(),
        random_value: b"r".to_vec(),
        payload_signature: BASE64.encode(sign_payload(player_key(), "1/2", b"r", &["hello"])),
        expires_at: FAR_FUTURE_EXPIRY,
        public_key: BASE64.encode(&der),
        key_signature: BASE64.encode(attest(root_key(), &attested_for, FAR_FUTURE_EXPIRY, &der)),
        payload: vec![b"hello".to_vec()],
    };

    assert_eq!(service.verify(&request), None);
}

#[test]
fn test_payload_signed_by_root_rejected() {
    let service = make_service();
    let mut request = valid_request();
    request.payload_signature =
        BASE64.encode(sign_payload(root_key(), "1/2", b"r", &request.payload));

    assert_eq!(service.verify(&request), None);
}

// =============================================================================
// MALFORMED INPUT
// =============================================================================

type Mutation = (&'static str, fn(&mut VerificationRequest));

fn case(name: &'static str, mutate: fn(&mut VerificationRequest)) -> Mutation {
    (name, mutate)
}

fn truncate_key(request: &mut VerificationRequest) {
    let der = BASE64.decode(&request.public_key).unwrap();
    request.public_key = BASE64.encode(&der[..der.len() / 2]);
}

#[test]
fn test_malformed_inputs_yield_none() {
    let service = make_service();
    let valid = valid_request();

    let cases = [
        case("non-base64 key", |r| r.public_key = "***".into()),
        case("empty key", |r| r.public_key = String::new()),
        case("truncated key", truncate_key),
        case("non-base64 attestation", |r| r.key_signature = "!".into()),
        case("empty attestation", |r| r.key_signature = String::new()),
        case("oversized attestation", |r| {
            r.key_signature = BASE64.encode(vec![0xAB; 4096])
        }),
        case("undersized payload signature", |r| {
            r.payload_signature = BASE64.encode([1u8, 2, 3])
        }),
        case("owner without slash", |r| r.owner_id = "12".into()),
        case("owner overflow", |r| r.owner_id = "99999999999999999999/1".into()),
        case("hyphenated owner", |r| r.owner_id = EXPECTED.into()),
    ];

    for (name, mutate) in cases {
        let mut request = valid.clone();
        mutate(&mut request);
        assert_eq!(service.verify(&request), None, "{name}");
    }
}

#[test]
fn test_expired_key_rejected_by_default() {
    let service = make_service();
    let request = signed_request(
        player_key(),
        OwnerId::new(1, 2),
        b"r",
        vec![b"hello".to_vec()],
        NOW - 60_000,
    );

    assert_eq!(service.verify(&request), None);
}

#[test]
fn test_signed_message_cannot_be_replayed_for_other_payload() {
    let service = make_service();
    let owner = OwnerId::new(1, 2);
    let der = public_key_der(player_key());
    let signer = MessageSigner::new(
        owner,
        player_key().clone(),
        FAR_FUTURE_EXPIRY,
        &attest(root_key(), &owner, FAR_FUTURE_EXPIRY, &der),
    )
    .unwrap();

    let map: HashMap<_, _> = signer.sign(&["hello"]).unwrap().to_map("").into_iter().collect();

    assert_eq!(
        service.verify_fields(&map, vec![b"hello".to_vec()]).as_deref(),
        Some(EXPECTED)
    );
    assert_eq!(service.verify_fields(&map, vec![b"goodbye".to_vec()]), None);
}

// =============================================================================
// CONCURRENCY
// =============================================================================

#[test]
fn test_shared_service_across_threads() {
    let service = Arc::new(make_service());
    let request = Arc::new(valid_request());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            let request = Arc::clone(&request);
            std::thread::spawn(move || service.verify(&request))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some(EXPECTED));
    }
}

#[test]
fn test_batch_of_mixed_requests() {
    let service = make_service();
    let mut requests: Vec<_> = (0..6).map(|_| valid_request()).collect();
    requests[3].payload = vec![b"nope".to_vec()];

    let result = service.batch_verify(&requests);

    assert_eq!(result.valid_count, 5);
    assert_eq!(result.invalid_count, 1);
    assert_eq!(result.results[3], None);
}
