//! Property-based tests for range proof soundness and completeness

use crate::{AggBulletProof, RangeProver, RangeShape, RangeVerifier};
use proptest::prelude::*;
use rand::thread_rng;
use zether_core::{ParamsConfig, PublicParams};

fn params() -> PublicParams {
    PublicParams::new(ParamsConfig::default()).unwrap()
}

/// Test that valid range proofs always verify
proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn test_completeness(value in any::<u32>()) {
        let params = params();
        let mut rng = thread_rng();
        let proof = RangeProver::new(&params).prove_range(value as u64, &mut rng)?;
        prop_assert!(RangeVerifier::new(&params).verify_range(&proof).is_ok());
    }
}

/// Test that out-of-range values cannot be proven
proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn test_soundness_out_of_range(excess in 0u64..(1u64 << 40)) {
        let params = params();
        let mut rng = thread_rng();
        let invalid_value = (1u64 << 32) + excess;
        prop_assert!(RangeProver::new(&params).prove_range(invalid_value, &mut rng).is_err());
    }
}

/// Test that aggregated proofs only verify under the bit width they were made for
proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn test_bit_width_specificity(a in 0u64..256, b in 0u64..256) {
        let params = params();
        let mut rng = thread_rng();
        let shape = RangeShape::new(8, 2)?;
        let proof = RangeProver::new(&params).prove_aggregate(shape, &[a, b], &mut rng)?;

        let verifier = RangeVerifier::new(&params);
        prop_assert!(verifier.verify_aggregate(shape, &proof).is_ok());
        prop_assert!(verifier.verify_aggregate(RangeShape::new(16, 2)?, &proof).is_err());
    }
}

/// Test consistency across multiple proofs of the same values
proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn test_consistency(a in 0u64..65536, b in 0u64..65536) {
        let params = params();
        let mut rng = thread_rng();
        let shape = RangeShape::new(16, 2)?;
        let prover = RangeProver::new(&params);
        let verifier = RangeVerifier::new(&params);

        let proof1 = prover.prove_aggregate(shape, &[a, b], &mut rng)?;
        let proof2 = prover.prove_aggregate(shape, &[a, b], &mut rng)?;

        prop_assert!(verifier.verify_aggregate(shape, &proof1).is_ok());
        prop_assert!(verifier.verify_aggregate(shape, &proof2).is_ok());

        // Fresh blinding every time
        prop_assert_ne!(proof1.to_bytes(), proof2.to_bytes());

        let decoded = AggBulletProof::from_bytes(&proof1.to_bytes())?;
        prop_assert_eq!(decoded, proof1);
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_edge_values() {
        let params = params();
        let mut rng = thread_rng();
        let shape = RangeShape::new(16, 2).unwrap();
        let proof = RangeProver::new(&params)
            .prove_aggregate(shape, &[0, 65535], &mut rng)
            .unwrap();
        assert!(RangeVerifier::new(&params).verify_aggregate(shape, &proof).is_ok());
    }

    #[test]
    fn test_deterministic_failure() {
        let params = params();
        let mut rng = thread_rng();
        let shape = RangeShape::new(16, 2).unwrap();
        // 65536 needs 17 bits
        assert!(RangeProver::new(&params)
            .prove_aggregate(shape, &[1, 65536], &mut rng)
            .is_err());
    }

    #[test]
    fn test_zero_bit_width_fails() {
        assert!(RangeShape::new(0, 1).is_err());
        assert!(RangeShape::new(65, 1).is_err());
    }
}
