//! Benchmarks for transfer and withdraw proofs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::thread_rng;
use zether::{TransferVerifier, WithdrawBuilder, WithdrawVerifier};
use zether_benches::{sample_ring, sample_transfer};
use zether_core::{ParamsConfig, PublicParams};

const RING_SIZES: [usize; 4] = [4, 16, 64, 256];

fn bench_transfer_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer_generation");
    group.sample_size(10);
    let params = PublicParams::new(ParamsConfig::default()).unwrap();

    for size in RING_SIZES {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("prove", size), &size, |b, &size| {
            let mut rng = thread_rng();
            b.iter(|| black_box(sample_transfer(&params, size, &mut rng).unwrap()));
        });
    }

    group.finish();
}

fn bench_transfer_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer_verification");
    group.sample_size(10);
    let params = PublicParams::new(ParamsConfig::default()).unwrap();
    let verifier = TransferVerifier::new(&params);

    for size in RING_SIZES {
        group.throughput(Throughput::Elements(size as u64));
        let transfer = sample_transfer(&params, size, &mut thread_rng()).unwrap();
        group.bench_with_input(BenchmarkId::new("verify", size), &size, |b, _| {
            b.iter(|| {
                verifier
                    .verify(black_box(&transfer.statement), black_box(&transfer.proof))
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_withdraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("withdraw");
    let params = PublicParams::new(ParamsConfig::default()).unwrap();
    let mut rng = thread_rng();
    let (sender, _, current) = sample_ring(&params, 4, &mut rng);
    let builder = WithdrawBuilder::new(&params);

    group.bench_function("prove", |b| {
        b.iter(|| black_box(builder.build(&sender, &current[0], 100, 1, b"bench", &mut rng).unwrap()));
    });

    let withdrawal = builder.build(&sender, &current[0], 100, 1, b"bench", &mut thread_rng()).unwrap();
    let verifier = WithdrawVerifier::new(&params);
    group.bench_function("verify", |b| {
        b.iter(|| {
            verifier
                .verify(black_box(&withdrawal.statement), black_box(&withdrawal.proof))
                .unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_transfer_generation, bench_transfer_verification, bench_withdraw);
criterion_main!(benches);
