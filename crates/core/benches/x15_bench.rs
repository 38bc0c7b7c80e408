//! Benchmark for the X15 chain and nonce scanner
//!
//! Runs on the stand-in primitives, so absolute numbers only measure the
//! chaining and scanning overhead around SHA-512.

use std::sync::atomic::AtomicBool;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use x15_core::{Header, NonceRange, Target, scan, testing};

fn bench_hash(c: &mut Criterion) {
    let chain = testing::chain();
    let bytes = Header::default().to_be_bytes();

    c.bench_function("x15_single", |b| b.iter(|| chain.hash(black_box(&bytes))));
}

fn bench_scan(c: &mut Criterion) {
    let chain = testing::chain();
    let cancel = AtomicBool::new(false);
    let mut group = c.benchmark_group("x15_scan");
    group.throughput(Throughput::Elements(256));

    group.bench_function("exhaust_256", |b| {
        let mut header = Header::default();
        b.iter(|| {
            scan(
                &chain,
                &mut header,
                black_box(&Target::ZERO),
                NonceRange::new(0, 256),
                &cancel,
            )
        })
    });
    group.finish();
}

fn bench_hash_many(c: &mut Criterion) {
    let chain = testing::chain();
    let headers: Vec<[u8; 80]> = (0..1024u32)
        .map(|n| {
            let mut header = Header::default();
            header.set_nonce(n);
            header.to_be_bytes()
        })
        .collect();

    let mut group = c.benchmark_group("x15_batch");
    group.throughput(Throughput::Elements(headers.len() as u64));
    group.bench_function("hash_many_1024", |b| {
        b.iter(|| chain.hash_many(black_box(&headers)))
    });
    group.finish();
}

criterion_group!(benches, bench_hash, bench_scan, bench_hash_many);
criterion_main!(benches);
