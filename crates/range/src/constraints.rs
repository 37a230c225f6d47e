//! Range constraint building blocks shared by every range-proof user
//!
//! For `m` values of `n` bits each, with `aL` the concatenated bits and
//! `aR = aL - 1`:
//!
//! ```text
//! l(X) = (aL - z·1) + sL·X
//! r(X) = y^nm ∘ (aR + z·1 + sR·X) + Σ_j z^(1+j)·(0 ‖ 2^n ‖ 0)
//! t(X) = <l(X), r(X)> = t0 + t1·X + t2·X²
//! ```
//!
//! The transfer and withdraw proofs reuse these pieces with their own
//! challenge derivation.

use rand_core::{CryptoRng, RngCore};
use rayon::prelude::*;
use zether_core::{
    decompose, ensure_length, hadamard_product, inner_product, invert, is_power_of_two,
    map_into_group, random_scalars, scalar_powers, scalar_to_decimal, sum_of_powers,
    vector_add, vector_add_scalar, vector_scale, GeneratorSet, PedersenCommitment, Point,
    Scalar, Transcript, VectorCommitment, ZetherError, ZetherResult,
};
use zether_ipa::{InnerProductProof, InnerProductProver, InnerProductVerifier};
use ark_ff::One;

/// Bit width and number of values of a (possibly aggregated) range proof
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeShape {
    bits: usize,
    values: usize,
}

impl RangeShape {
    pub fn new(bits: usize, values: usize) -> ZetherResult<Self> {
        if !is_power_of_two(bits) || bits > 64 {
            return Err(ZetherError::InvalidParameters(format!(
                "bit width {} must be a power of two in [1, 64]",
                bits
            )));
        }
        if !is_power_of_two(values) {
            return Err(ZetherError::InvalidParameters(format!(
                "aggregation size {} must be a power of two",
                values
            )));
        }
        Ok(Self { bits, values })
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    pub fn values(&self) -> usize {
        self.values
    }

    /// Total vector length `n·m`
    pub fn len(&self) -> usize {
        self.bits * self.values
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Commitments `A` (to the bits) and `S` (to the blinding vectors)
#[derive(Debug, Clone)]
pub struct BitCommitments {
    a: VectorCommitment,
    s: VectorCommitment,
}

impl BitCommitments {
    /// Decompose `values` and commit; any value `≥ 2^n` is `OutOfRange`
    pub fn commit<R: RngCore + CryptoRng>(
        gens: &GeneratorSet,
        shape: RangeShape,
        values: &[u64],
        rng: &mut R,
    ) -> ZetherResult<Self> {
        if values.len() != shape.values() {
            return Err(ZetherError::InvalidWitness(format!(
                "{} values for an aggregation of {}",
                values.len(),
                shape.values()
            )));
        }

        let mut a_l = Vec::with_capacity(shape.len());
        for value in values {
            a_l.extend(decompose(*value, 2, shape.bits())?);
        }
        let a_r = vector_add_scalar(&a_l, &-Scalar::one());

        let a = VectorCommitment::new(gens, a_l, a_r, rng)?;
        let s = VectorCommitment::new(
            gens,
            random_scalars(rng, shape.len()),
            random_scalars(rng, shape.len()),
            rng,
        )?;
        Ok(Self { a, s })
    }

    /// Commitment to `aL, aR`
    pub fn a(&self) -> Point {
        self.a.commit()
    }

    /// Commitment to `sL, sR`
    pub fn s(&self) -> Point {
        self.s.commit()
    }

    /// `μ = α + ρ·x`
    pub fn mu(&self, x: &Scalar) -> Scalar {
        self.a.blinding() + self.s.blinding() * x
    }
}

/// Coefficient vectors of `l(X)` and `r(X)`
#[derive(Debug, Clone)]
pub struct RangePolynomials {
    l0: Vec<Scalar>,
    l1: Vec<Scalar>,
    r0: Vec<Scalar>,
    r1: Vec<Scalar>,
}

impl RangePolynomials {
    pub fn new(shape: RangeShape, bits: &BitCommitments, y: &Scalar, z: &Scalar) -> ZetherResult<Self> {
        let n = shape.bits();
        let nm = shape.len();
        let y_powers = scalar_powers(y, nm);

        let l0 = vector_add_scalar(bits.a.left(), &-*z);
        let l1 = bits.s.left().to_vec();

        let mut r0 = hadamard_product(&y_powers, &vector_add_scalar(bits.a.right(), z))?;
        let twos = scalar_powers(&Scalar::from(2u64), n);
        let mut z_power = *z * z;
        for block in r0.chunks_mut(n) {
            for (entry, two) in block.iter_mut().zip(twos.iter()) {
                *entry += z_power * two;
            }
            z_power *= z;
        }
        let r1 = hadamard_product(&y_powers, bits.s.right())?;

        Ok(Self { l0, l1, r0, r1 })
    }

    /// `t1 = <l0, r1> + <l1, r0>`
    pub fn t1(&self) -> ZetherResult<Scalar> {
        Ok(inner_product(&self.l0, &self.r1)? + inner_product(&self.l1, &self.r0)?)
    }

    /// `t2 = <l1, r1>`
    pub fn t2(&self) -> ZetherResult<Scalar> {
        inner_product(&self.l1, &self.r1)
    }

    /// `(l(x), r(x), <l(x), r(x)>)`
    pub fn evaluate(&self, x: &Scalar) -> ZetherResult<(Vec<Scalar>, Vec<Scalar>, Scalar)> {
        let l = vector_add(&self.l0, &vector_scale(&self.l1, x))?;
        let r = vector_add(&self.r0, &vector_scale(&self.r1, x))?;
        let t_hat = inner_product(&l, &r)?;
        Ok((l, r, t_hat))
    }
}

/// Pedersen commitments `T1, T2` to the `t(X)` coefficients
#[derive(Debug, Clone)]
pub struct PolyCommitments {
    t1: PedersenCommitment,
    t2: PedersenCommitment,
}

impl PolyCommitments {
    pub fn commit<R: RngCore + CryptoRng>(
        gens: &GeneratorSet,
        polys: &RangePolynomials,
        rng: &mut R,
    ) -> ZetherResult<Self> {
        Ok(Self {
            t1: PedersenCommitment::new(gens, polys.t1()?, rng),
            t2: PedersenCommitment::new(gens, polys.t2()?, rng),
        })
    }

    pub fn t1(&self) -> Point {
        self.t1.commit()
    }

    pub fn t2(&self) -> Point {
        self.t2.commit()
    }

    /// `τ1·x + τ2·x²`, without any value-commitment blinding
    pub fn tau_x(&self, x: &Scalar) -> Scalar {
        self.t1.blinding() * x + self.t2.blinding() * x * x
    }
}

/// The `y, z, x` challenges of one range proof
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeChallenges {
    pub y: Scalar,
    pub z: Scalar,
    pub x: Scalar,
}

impl RangeChallenges {
    /// `δ(y, z) = (z - z²)·<1, y^nm> - Σ_j z^(j+2)·<1, 2^n>`
    pub fn delta(&self, shape: RangeShape) -> Scalar {
        let z = self.z;
        let z2 = z * z;
        let sum_twos = sum_of_powers(&Scalar::from(2u64), shape.bits());

        let mut result = (z - z2) * sum_of_powers(&self.y, shape.len());
        let mut z_power = z2 * z;
        for _ in 0..shape.values() {
            result -= z_power * sum_twos;
            z_power *= z;
        }
        result
    }

    /// Weights `z^(1+j)` applied to the value commitments, `j = 1..=m`
    pub fn value_weights(&self, shape: RangeShape) -> Vec<Scalar> {
        let z2 = self.z * self.z;
        scalar_powers(&self.z, shape.values())
            .into_iter()
            .map(|zj| zj * z2)
            .collect()
    }

    /// `P = A + x·S - z·Σg + Σ (z·y^i + z^(1+j)·2^k)·h'_i - μ·h`
    pub fn ipa_commitment(
        &self,
        shape: RangeShape,
        gens: &GeneratorSet,
        hprime: &[Point],
        a: Point,
        s: Point,
        mu: Scalar,
    ) -> ZetherResult<Point> {
        let nm = shape.len();
        let (g_vec, _) = gens.vectors(nm)?;
        ensure_length(nm, hprime.len())?;

        let y_powers = scalar_powers(&self.y, nm);
        let twos = scalar_powers(&Scalar::from(2u64), shape.bits());
        let weights = self.value_weights(shape);

        let mut scalars = Vec::with_capacity(2 * nm + 3);
        let mut points = Vec::with_capacity(2 * nm + 3);
        scalars.extend([Scalar::one(), self.x, -mu]);
        points.extend([a, s, gens.h]);

        scalars.extend(std::iter::repeat(-self.z).take(nm));
        points.extend_from_slice(g_vec);

        for (i, h) in hprime.iter().enumerate() {
            let block = i / shape.bits();
            let bit = i % shape.bits();
            scalars.push(self.z * y_powers[i] + weights[block] * twos[bit]);
            points.push(*h);
        }

        Point::multiscalar_mul(&scalars, &points)
    }
}

/// `h'_i = y^(-i)·h_i`
pub fn hprime(h_vec: &[Point], y: &Scalar) -> ZetherResult<Vec<Point>> {
    let y_inv = invert(y)?;
    let powers = scalar_powers(&y_inv, h_vec.len());
    Ok(h_vec
        .par_iter()
        .zip(powers.par_iter())
        .map(|(h, p)| *h * *p)
        .collect())
}

/// `x = H(T1 ‖ T2 ‖ z)`
pub fn challenge_x(t1: &Point, t2: &Point, z: &Scalar) -> Scalar {
    let mut transcript = Transcript::new();
    transcript.append_point(t1);
    transcript.append_point(t2);
    transcript.append_scalar(z);
    transcript.challenge_scalar()
}

/// `y = H(prefix)`, `z = H(prefix ‖ y)`
pub fn challenge_yz(mut transcript: Transcript) -> (Scalar, Scalar) {
    let y = transcript.challenge_scalar();
    transcript.append_scalar(&y);
    (y, transcript.challenge_scalar())
}

/// Inner-product base point derived from a challenge
pub fn ipa_base(challenge: &Scalar) -> Point {
    map_into_group(scalar_to_decimal(challenge))
}

/// Run the IPA for `<l, r> = t̂` over `g` and `h'`
pub fn prove_inner_product(
    gens: &GeneratorSet,
    hprime: &[Point],
    l: &[Scalar],
    r: &[Scalar],
    challenge: &Scalar,
) -> ZetherResult<InnerProductProof> {
    let (g_vec, _) = gens.vectors(hprime.len())?;
    InnerProductProver::new(g_vec, hprime, ipa_base(challenge))?.prove(l, r, challenge)
}

/// Check an IPA produced by [`prove_inner_product`]
pub fn verify_inner_product(
    gens: &GeneratorSet,
    hprime: &[Point],
    p: &Point,
    t_hat: &Scalar,
    challenge: &Scalar,
    proof: &InnerProductProof,
) -> ZetherResult<()> {
    let (g_vec, _) = gens.vectors(hprime.len())?;
    InnerProductVerifier::new(g_vec, hprime, ipa_base(challenge))?.verify(proof, p, t_hat, challenge)
}
