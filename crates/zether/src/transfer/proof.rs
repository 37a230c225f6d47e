//! Transfer proof structure and serialization

use zether_core::{decode_hex, ByteReader, ByteWriter, Point, Scalar, ZetherError, ZetherResult};
use zether_ipa::InnerProductProof;

/// Proof that a [`super::TransferStatement`] moves a hidden amount between
/// two hidden ring members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferProof {
    /// Range proof bit commitment
    pub bp_a: Point,
    /// Range proof blinding commitment
    pub bp_s: Point,
    /// Commitment to the index blinders and cross terms
    pub a: Point,
    /// Commitment to the index bits and cross terms
    pub b: Point,
    pub cln_tilde: Vec<Point>,
    pub crn_tilde: Vec<Point>,
    pub c0_tilde: Vec<Point>,
    pub d_tilde: Vec<Point>,
    pub y0_tilde: Vec<Point>,
    pub g_tilde: Vec<Point>,
    pub cx_tilde: Vec<Point>,
    pub yx_tilde: Vec<Point>,
    /// `F_k,1(ω)` for the sender bits then the receiver bits
    pub f: Vec<Scalar>,
    pub z_a: Scalar,
    pub t1: Point,
    pub t2: Point,
    pub t_hat: Scalar,
    pub mu: Scalar,
    /// Sigma challenge
    pub c: Scalar,
    pub s_sk: Scalar,
    pub s_r: Scalar,
    pub s_b: Scalar,
    pub s_tau: Scalar,
    pub ipp: InnerProductProof,
}

impl TransferProof {
    /// Tilde vectors in transcript order
    pub(crate) fn tilde_vectors(&self) -> [&[Point]; 8] {
        [
            &self.cln_tilde,
            &self.crn_tilde,
            &self.c0_tilde,
            &self.d_tilde,
            &self.y0_tilde,
            &self.g_tilde,
            &self.cx_tilde,
            &self.yx_tilde,
        ]
    }

    /// Every tilde vector must have `m` entries and `f` must have `2m`
    pub fn validate_structure(&self, m: usize) -> ZetherResult<()> {
        for tilde in self.tilde_vectors() {
            if tilde.len() != m {
                return Err(ZetherError::length(m, tilde.len()));
            }
        }
        if self.f.len() != 2 * m {
            return Err(ZetherError::length(2 * m, self.f.len()));
        }
        self.ipp.validate_structure()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        writer.put_point(&self.bp_a);
        writer.put_point(&self.bp_s);
        writer.put_point(&self.a);
        writer.put_point(&self.b);
        for tilde in self.tilde_vectors() {
            writer.put_points(tilde);
        }
        writer.put_scalars(&self.f);
        writer.put_scalar(&self.z_a);
        writer.put_point(&self.t1);
        writer.put_point(&self.t2);
        for scalar in [self.t_hat, self.mu, self.c, self.s_sk, self.s_r, self.s_b, self.s_tau] {
            writer.put_scalar(&scalar);
        }
        self.ipp.write_to(&mut writer);
        writer.into_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> ZetherResult<Self> {
        let mut reader = ByteReader::new(bytes);
        let proof = Self {
            bp_a: reader.read_point()?,
            bp_s: reader.read_point()?,
            a: reader.read_point()?,
            b: reader.read_point()?,
            cln_tilde: reader.read_points()?,
            crn_tilde: reader.read_points()?,
            c0_tilde: reader.read_points()?,
            d_tilde: reader.read_points()?,
            y0_tilde: reader.read_points()?,
            g_tilde: reader.read_points()?,
            cx_tilde: reader.read_points()?,
            yx_tilde: reader.read_points()?,
            f: reader.read_scalars()?,
            z_a: reader.read_scalar()?,
            t1: reader.read_point()?,
            t2: reader.read_point()?,
            t_hat: reader.read_scalar()?,
            mu: reader.read_scalar()?,
            c: reader.read_scalar()?,
            s_sk: reader.read_scalar()?,
            s_r: reader.read_scalar()?,
            s_b: reader.read_scalar()?,
            s_tau: reader.read_scalar()?,
            ipp: InnerProductProof::read_from(&mut reader)?,
        };
        reader.finish()?;
        Ok(proof)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_hex(s: &str) -> ZetherResult<Self> {
        Self::from_bytes(&decode_hex(s)?)
    }
}

zether_core::impl_hex_serde!(TransferProof);
