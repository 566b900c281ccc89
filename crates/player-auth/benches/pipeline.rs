//! # Player Auth Pipeline Benchmarks
//!
//! - Single end-to-end verification (attestation + payload)
//! - Early rejection cost (bad attestation, no key parsing)
//! - Batch verification throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use player_auth::domain::test_helpers::{test_anchor, valid_request};
use player_auth::{FixedClock, PlayerAuthApi, PlayerAuthService, VerifierConfig};

const NOW: i64 = 1_700_000_000_000;

fn service() -> PlayerAuthService<FixedClock> {
    PlayerAuthService::new(test_anchor(), VerifierConfig::default(), FixedClock(NOW))
        .expect("default config is valid")
}

fn bench_single(c: &mut Criterion) {
    let service = service();
    let valid = valid_request();
    let mut rejected = valid.clone();
    rejected.expires_at += 1;

    let mut group = c.benchmark_group("verify");
    group.bench_function("valid", |b| b.iter(|| service.verify(black_box(&valid))));
    group.bench_function("bad_attestation", |b| {
        b.iter(|| service.verify(black_box(&rejected)))
    });
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let service = service();
    let mut group = c.benchmark_group("batch_verify");

    for size in [16usize, 128] {
        let requests: Vec<_> = (0..size).map(|_| valid_request()).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &requests, |b, requests| {
            b.iter(|| service.batch_verify(black_box(requests)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single, bench_batch);
criterion_main!(benches);
