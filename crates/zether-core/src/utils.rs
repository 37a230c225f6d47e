//! Scalar vector and polynomial helpers

use crate::{ensure_length, Scalar, ZetherError, ZetherResult};
use ark_ff::{Field, One, Zero};

/// Compute powers of a scalar: [1, x, x^2, x^3, ..., x^(n-1)]
///
/// Powers of zero are all zero, including the first entry.
pub fn scalar_powers(x: &Scalar, n: usize) -> Vec<Scalar> {
    let mut powers = Vec::with_capacity(n);
    let mut current = if x.is_zero() { Scalar::zero() } else { Scalar::one() };

    for _ in 0..n {
        powers.push(current);
        current *= x;
    }

    powers
}

/// Sum of the first n powers: <1, x^n>
pub fn sum_of_powers(x: &Scalar, n: usize) -> Scalar {
    scalar_powers(x, n).into_iter().sum()
}

/// Multiplicative inverse; zero has none
pub fn invert(x: &Scalar) -> ZetherResult<Scalar> {
    x.inverse()
        .ok_or_else(|| ZetherError::InvalidParameters("zero has no inverse".to_string()))
}

/// Compute the inner product of two scalar vectors
pub fn inner_product(a: &[Scalar], b: &[Scalar]) -> ZetherResult<Scalar> {
    ensure_length(a.len(), b.len())?;
    Ok(a.iter().zip(b.iter()).map(|(ai, bi)| *ai * bi).sum())
}

/// Hadamard (element-wise) product of two scalar vectors
pub fn hadamard_product(a: &[Scalar], b: &[Scalar]) -> ZetherResult<Vec<Scalar>> {
    ensure_length(a.len(), b.len())?;
    Ok(a.iter().zip(b.iter()).map(|(ai, bi)| *ai * bi).collect())
}

/// Add two scalar vectors element-wise
pub fn vector_add(a: &[Scalar], b: &[Scalar]) -> ZetherResult<Vec<Scalar>> {
    ensure_length(a.len(), b.len())?;
    Ok(a.iter().zip(b.iter()).map(|(ai, bi)| *ai + bi).collect())
}

/// Subtract two scalar vectors element-wise: a - b
pub fn vector_sub(a: &[Scalar], b: &[Scalar]) -> ZetherResult<Vec<Scalar>> {
    ensure_length(a.len(), b.len())?;
    Ok(a.iter().zip(b.iter()).map(|(ai, bi)| *ai - bi).collect())
}

/// Scale a vector by a scalar
pub fn vector_scale(vec: &[Scalar], scalar: &Scalar) -> Vec<Scalar> {
    vec.iter().map(|v| *v * scalar).collect()
}

/// Add the same scalar to every entry
pub fn vector_add_scalar(vec: &[Scalar], scalar: &Scalar) -> Vec<Scalar> {
    vec.iter().map(|v| *v + scalar).collect()
}

pub fn vector_neg(vec: &[Scalar]) -> Vec<Scalar> {
    vec.iter().map(|v| -*v).collect()
}

/// Digits of `value` in `base`, least significant first, exactly `len` of them.
///
/// Fails with `OutOfRange` when `value ≥ base^len`.
pub fn decompose(value: u64, base: u64, len: usize) -> ZetherResult<Vec<Scalar>> {
    if base < 2 {
        return Err(ZetherError::InvalidParameters(format!("base {} < 2", base)));
    }

    let mut digits = Vec::with_capacity(len);
    let mut rest = value;
    for _ in 0..len {
        digits.push(Scalar::from(rest % base));
        rest /= base;
    }

    if rest != 0 {
        return Err(ZetherError::OutOfRange(format!(
            "{} does not fit in {} base-{} digits",
            value, len, base
        )));
    }
    Ok(digits)
}

/// Construct the bit decomposition of a value
pub fn bit_decomposition(value: u64, bits: usize) -> ZetherResult<Vec<Scalar>> {
    decompose(value, 2, bits)
}

/// Evaluate a polynomial given by ascending coefficients
pub fn poly_evaluate(coeffs: &[Scalar], x: &Scalar) -> Scalar {
    coeffs
        .iter()
        .rev()
        .fold(Scalar::zero(), |acc, c| acc * x + c)
}

/// Product of two polynomials in ascending coefficient form
pub fn poly_mul(a: &[Scalar], b: &[Scalar]) -> Vec<Scalar> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut out = vec![Scalar::zero(); a.len() + b.len() - 1];
    for (i, ai) in a.iter().enumerate() {
        for (j, bj) in b.iter().enumerate() {
            out[i + j] += *ai * bj;
        }
    }
    out
}

/// Check if a number is a power of 2
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && (n & (n - 1)) == 0
}

/// log2 of a power of two
pub fn log2_exact(n: usize) -> ZetherResult<usize> {
    if !is_power_of_two(n) {
        return Err(ZetherError::InvalidParameters(format!(
            "{} is not a power of two",
            n
        )));
    }
    Ok(n.trailing_zeros() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scalar_powers() {
        let powers = scalar_powers(&Scalar::from(3u64), 4);
        let expected: Vec<Scalar> = [1u64, 3, 9, 27].iter().map(|v| Scalar::from(*v)).collect();
        assert_eq!(powers, expected);
        assert_eq!(sum_of_powers(&Scalar::from(2u64), 4), Scalar::from(15u64));
        assert!(scalar_powers(&Scalar::zero(), 0).is_empty());
        assert_eq!(scalar_powers(&Scalar::zero(), 3), vec![Scalar::zero(); 3]);
    }

    #[test]
    fn test_length_mismatch() {
        let a = vec![Scalar::one(); 3];
        let b = vec![Scalar::one(); 2];
        assert_eq!(
            inner_product(&a, &b),
            Err(ZetherError::VectorLengthMismatch { expected: 3, actual: 2 })
        );
        assert!(vector_add(&a, &b).is_err());
        assert!(vector_sub(&a, &b).is_err());
        assert!(hadamard_product(&a, &b).is_err());
    }

    #[test]
    fn test_decompose() {
        let bits = bit_decomposition(6, 4).unwrap();
        assert_eq!(
            bits,
            vec![Scalar::zero(), Scalar::one(), Scalar::one(), Scalar::zero()]
        );
        let digits = decompose(123, 10, 3).unwrap();
        assert_eq!(digits[0], Scalar::from(3u64));
        assert_eq!(digits[2], Scalar::from(1u64));

        assert!(matches!(bit_decomposition(16, 4), Err(ZetherError::OutOfRange(_))));
        assert!(bit_decomposition(u64::MAX, 64).is_ok());
    }

    #[test]
    fn test_poly() {
        // (1 + 2x)(3 + x) = 3 + 7x + 2x^2
        let a = vec![Scalar::from(1u64), Scalar::from(2u64)];
        let b = vec![Scalar::from(3u64), Scalar::from(1u64)];
        let product = poly_mul(&a, &b);
        assert_eq!(
            product,
            vec![Scalar::from(3u64), Scalar::from(7u64), Scalar::from(2u64)]
        );
        assert_eq!(poly_evaluate(&product, &Scalar::from(2u64)), Scalar::from(25u64));

        let negated = vector_neg(&product);
        assert_eq!(negated[1], -Scalar::from(7u64));
        assert_eq!(vector_add(&product, &negated).unwrap(), vec![Scalar::zero(); 3]);
        assert!(vector_neg(&[]).is_empty());
    }

    #[test]
    fn test_log2() {
        assert_eq!(log2_exact(1).unwrap(), 0);
        assert_eq!(log2_exact(512).unwrap(), 9);
        assert!(log2_exact(0).is_err());
        assert!(log2_exact(6).is_err());
    }

    proptest! {
        #[test]
        fn prop_inner_product_bilinear(xs in prop::collection::vec(any::<u64>(), 1..16), k in any::<u64>()) {
            let a: Vec<Scalar> = xs.iter().map(|x| Scalar::from(*x)).collect();
            let k = Scalar::from(k);
            let lhs = inner_product(&vector_scale(&a, &k), &a).unwrap();
            let rhs = k * inner_product(&a, &a).unwrap();
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn prop_bits_recompose(value in any::<u32>()) {
            let bits = bit_decomposition(value as u64, 32).unwrap();
            let twos = scalar_powers(&Scalar::from(2u64), 32);
            prop_assert_eq!(inner_product(&bits, &twos).unwrap(), Scalar::from(value as u64));
        }
    }
}
