//! Deterministic generators and the shared public parameters

use crate::{ParamsConfig, Point, Scalar, ZetherError, ZetherResult};
use ark_bn254::{Fq, G1Affine};
use ark_ec::AffineRepr;
use ark_ff::{Field, One, PrimeField};
use rayon::prelude::*;
use std::sync::Arc;
use tiny_keccak::{Hasher, Keccak};
use tracing::debug;

/// Label prefix of the left vector generators
pub const G_VECTOR_LABEL: &str = "venachaing";
/// Label prefix of the right vector generators
pub const H_VECTOR_LABEL: &str = "venachainh";

// Labels carry the index as one Unicode scalar; surrogates are not scalars.
const MAX_VECTOR_LENGTH: usize = 0xD800;

/// Hash a label onto the curve.
///
/// `x = Keccak-256(label) mod P`, incremented until `x³ + 3` is a square;
/// the point is `(x, sqrt(x³ + 3))`.
pub fn map_into_group(label: impl AsRef<[u8]>) -> Point {
    let mut keccak = Keccak::v256();
    keccak.update(label.as_ref());
    let mut digest = [0u8; 32];
    keccak.finalize(&mut digest);

    let b = Fq::from(3u64);
    let mut x = Fq::from_be_bytes_mod_order(&digest);
    loop {
        let rhs = x.square() * x + b;
        if let Some(y) = rhs.sqrt() {
            return Point(G1Affine::new_unchecked(x, y).into_group());
        }
        x += Fq::one();
    }
}

/// Per-epoch nonce base `map_into_group("zether" ‖ decimal(epoch))`
pub fn epoch_base(epoch: u64) -> Point {
    map_into_group(format!("zether{}", epoch))
}

fn vector_label(prefix: &str, index: usize) -> ZetherResult<String> {
    let c = u32::try_from(index)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| ZetherError::InvalidParameters(format!("no generator label for {}", index)))?;
    let mut label = String::with_capacity(prefix.len() + 4);
    label.push_str(prefix);
    label.push(c);
    Ok(label)
}

/// Generator set for range and bit-commitment proofs
#[derive(Debug, Clone)]
pub struct GeneratorSet {
    /// Primary generator G
    pub g: Point,
    /// Blinding generator H
    pub h: Point,
    g_vec: Vec<Point>,
    h_vec: Vec<Point>,
}

impl GeneratorSet {
    /// Derive `length` vector generators of each side in parallel
    pub fn new(length: usize) -> ZetherResult<Self> {
        if length > MAX_VECTOR_LENGTH {
            return Err(ZetherError::InvalidParameters(format!(
                "generator vector length {} exceeds {}",
                length, MAX_VECTOR_LENGTH
            )));
        }

        let pairs = (0..length)
            .into_par_iter()
            .map(|i| {
                Ok((
                    map_into_group(vector_label(G_VECTOR_LABEL, i)?),
                    map_into_group(vector_label(H_VECTOR_LABEL, i)?),
                ))
            })
            .collect::<ZetherResult<Vec<(Point, Point)>>>()?;
        let (g_vec, h_vec) = pairs.into_iter().unzip();

        Ok(Self {
            g: map_into_group("g"),
            h: map_into_group("h"),
            g_vec,
            h_vec,
        })
    }

    /// Get the vector length
    pub fn vector_length(&self) -> usize {
        self.g_vec.len()
    }

    /// Get a slice of the G vector generators
    pub fn g_vec(&self) -> &[Point] {
        &self.g_vec
    }

    /// Get a slice of the H vector generators
    pub fn h_vec(&self) -> &[Point] {
        &self.h_vec
    }

    /// First `length` generators of each side
    pub fn vectors(&self, length: usize) -> ZetherResult<(&[Point], &[Point])> {
        if length > self.vector_length() {
            return Err(ZetherError::InsufficientGenerators {
                needed: length,
                available: self.vector_length(),
            });
        }
        Ok((&self.g_vec[..length], &self.h_vec[..length]))
    }

    /// Compute vector commitment: <a, g> + <b, h>
    pub fn vector_commit(&self, a: &[Scalar], b: &[Scalar]) -> ZetherResult<Point> {
        if a.len() != b.len() {
            return Err(ZetherError::length(a.len(), b.len()));
        }
        let (g_vec, h_vec) = self.vectors(a.len())?;

        let scalars: Vec<Scalar> = a.iter().chain(b.iter()).copied().collect();
        let points: Vec<Point> = g_vec.iter().chain(h_vec.iter()).copied().collect();
        Point::multiscalar_mul(&scalars, &points)
    }
}

/// Immutable parameters built once and shared by every prove/verify call
#[derive(Debug, Clone)]
pub struct PublicParams {
    config: ParamsConfig,
    generators: GeneratorSet,
}

impl PublicParams {
    pub fn new(config: ParamsConfig) -> ZetherResult<Self> {
        config.validate()?;
        let generators = GeneratorSet::new(config.generator_count())?;
        debug!(
            vector_length = generators.vector_length(),
            max_ring_size = config.max_ring_size,
            "public parameters derived"
        );
        Ok(Self { config, generators })
    }

    /// Parameters behind a reference count, for sharing across threads
    pub fn shared(config: ParamsConfig) -> ZetherResult<Arc<Self>> {
        Self::new(config).map(Arc::new)
    }

    pub fn config(&self) -> &ParamsConfig {
        &self.config
    }

    pub fn generators(&self) -> &GeneratorSet {
        &self.generators
    }

    /// Global generator G
    pub fn g(&self) -> Point {
        self.generators.g
    }

    /// Blinding generator H
    pub fn h(&self) -> Point {
        self.generators.h
    }
}
