//! Withdraw proof structure and serialization

use zether_core::{decode_hex, ByteReader, ByteWriter, Point, Scalar, ZetherResult};
use zether_ipa::InnerProductProof;

/// Proof for a [`super::WithdrawStatement`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawProof {
    pub a: Point,
    pub s: Point,
    pub t1: Point,
    pub t2: Point,
    pub t_hat: Scalar,
    pub mu: Scalar,
    /// Sigma challenge, also seeds the inner product argument
    pub c: Scalar,
    pub s_sk: Scalar,
    pub s_b: Scalar,
    pub s_tau: Scalar,
    pub ipp: InnerProductProof,
}

impl WithdrawProof {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        for point in [self.a, self.s, self.t1, self.t2] {
            writer.put_point(&point);
        }
        for scalar in [self.t_hat, self.mu, self.c, self.s_sk, self.s_b, self.s_tau] {
            writer.put_scalar(&scalar);
        }
        self.ipp.write_to(&mut writer);
        writer.into_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> ZetherResult<Self> {
        let mut reader = ByteReader::new(bytes);
        let proof = Self {
            a: reader.read_point()?,
            s: reader.read_point()?,
            t1: reader.read_point()?,
            t2: reader.read_point()?,
            t_hat: reader.read_scalar()?,
            mu: reader.read_scalar()?,
            c: reader.read_scalar()?,
            s_sk: reader.read_scalar()?,
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

zether_core::impl_hex_serde!(WithdrawProof);
