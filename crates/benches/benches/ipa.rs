//! Benchmarks for inner product argument

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::thread_rng;
use zether_core::{inner_product, map_into_group, random_scalars, GeneratorSet, Scalar};
use zether_ipa::{InnerProductProver, InnerProductVerifier};

fn bench_ipa_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("ipa_generation");

    for vector_length in [8, 16, 32, 64, 128] {
        group.throughput(Throughput::Elements(vector_length as u64));

        group.bench_with_input(
            BenchmarkId::new("prove", vector_length),
            &vector_length,
            |b, &vector_length| {
                let mut rng = thread_rng();
                let generators = GeneratorSet::new(vector_length).unwrap();
                let u = map_into_group("ipa bench u");
                let prover = InnerProductProver::new(generators.g_vec(), generators.h_vec(), u).unwrap();

                let a = random_scalars(&mut rng, vector_length);
                let v = random_scalars(&mut rng, vector_length);
                let prev = Scalar::from(1u64);

                b.iter(|| {
                    let proof = prover.prove(black_box(&a), black_box(&v), &prev).unwrap();
                    black_box(proof)
                });
            },
        );
    }

    group.finish();
}

fn bench_ipa_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("ipa_verification");

    for vector_length in [8, 16, 32, 64, 128] {
        group.throughput(Throughput::Elements(vector_length as u64));

        // Pre-generate proof for verification benchmark
        let mut rng = thread_rng();
        let generators = GeneratorSet::new(vector_length).unwrap();
        let u = map_into_group("ipa bench u");
        let prover = InnerProductProver::new(generators.g_vec(), generators.h_vec(), u).unwrap();
        let verifier = InnerProductVerifier::new(generators.g_vec(), generators.h_vec(), u).unwrap();

        let a = random_scalars(&mut rng, vector_length);
        let v = random_scalars(&mut rng, vector_length);
        let prev = Scalar::from(1u64);
        let proof = prover.prove(&a, &v, &prev).unwrap();
        let p = generators.vector_commit(&a, &v).unwrap();
        let claim = inner_product(&a, &v).unwrap();

        group.bench_with_input(
            BenchmarkId::new("verify", vector_length),
            &vector_length,
            |b, &_vector_length| {
                b.iter(|| {
                    verifier.verify(black_box(&proof), &p, &claim, &prev).unwrap();
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_ipa_generation, bench_ipa_verification);
criterion_main!(benches);
