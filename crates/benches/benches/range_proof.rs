//! Benchmarks for range proof generation and verification

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::thread_rng;
use zether_core::{ParamsConfig, PublicParams};
use zether_range::{RangeProver, RangeShape, RangeVerifier};

fn params_for(bit_length: usize) -> PublicParams {
    PublicParams::new(ParamsConfig {
        range_bits: bit_length,
        ..ParamsConfig::default()
    })
    .unwrap()
}

fn bench_range_proof_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_proof_generation");

    for bit_length in [8, 16, 32, 64] {
        group.throughput(Throughput::Elements(bit_length as u64));
        let params = params_for(bit_length);

        group.bench_with_input(
            BenchmarkId::new("prove", bit_length),
            &bit_length,
            |b, &bit_length| {
                let mut rng = thread_rng();
                let prover = RangeProver::new(&params);
                let value = (1u64 << (bit_length - 1)) - 1; // Near max value

                b.iter(|| {
                    let proof = prover.prove_range(black_box(value), &mut rng).unwrap();
                    black_box(proof)
                });
            },
        );
    }

    group.finish();
}

fn bench_range_proof_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_proof_verification");

    for bit_length in [8, 16, 32, 64] {
        group.throughput(Throughput::Elements(bit_length as u64));

        // Pre-generate proof for verification benchmark
        let mut rng = thread_rng();
        let params = params_for(bit_length);
        let value = (1u64 << (bit_length - 1)) - 1;
        let proof = RangeProver::new(&params).prove_range(value, &mut rng).unwrap();
        let verifier = RangeVerifier::new(&params);

        group.bench_with_input(
            BenchmarkId::new("verify", bit_length),
            &bit_length,
            |b, &_bit_length| {
                b.iter(|| {
                    verifier.verify_range(black_box(&proof)).unwrap();
                });
            },
        );
    }

    group.finish();
}

fn bench_aggregated_range_proof(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregated_range_proof");
    let params = PublicParams::new(ParamsConfig::default()).unwrap();
    let shape = RangeShape::new(params.config().agg_range_bits, params.config().agg_values).unwrap();
    let values = [1_000u64, 65_535];

    group.bench_function("prove", |b| {
        let mut rng = thread_rng();
        let prover = RangeProver::new(&params);
        b.iter(|| black_box(prover.prove_aggregate(shape, black_box(&values), &mut rng).unwrap()));
    });

    let proof = RangeProver::new(&params)
        .prove_aggregate(shape, &values, &mut thread_rng())
        .unwrap();
    let verifier = RangeVerifier::new(&params);
    group.bench_function("verify", |b| {
        b.iter(|| verifier.verify_aggregate(shape, black_box(&proof)).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_range_proof_generation,
    bench_range_proof_verification,
    bench_aggregated_range_proof
);
criterion_main!(benches);
