//! Range proof structures and serialization

use zether_core::{decode_hex, ByteReader, ByteWriter, Point, Scalar, ZetherError, ZetherResult};
use zether_ipa::InnerProductProof;

/// A range proof that `m` committed values each lie in `[0, 2^n)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggBulletProof {
    /// Value commitments `V_j = v_j·g + γ_j·h`
    pub v: Vec<Point>,
    /// Commitment to the bit vectors
    pub a: Point,
    /// Commitment to the blinding vectors
    pub s: Point,
    /// Commitment to the linear coefficient of t(X)
    pub t1: Point,
    /// Commitment to the quadratic coefficient of t(X)
    pub t2: Point,
    pub taux: Scalar,
    pub mu: Scalar,
    pub t_hat: Scalar,
    /// Inner product argument for <l, r> = t̂
    pub ipp: InnerProductProof,
}

impl AggBulletProof {
    /// Number of aggregated values
    pub fn values(&self) -> usize {
        self.v.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        writer.put_points(&self.v);
        write_transcript(&mut writer, self.a, self.s, self.t1, self.t2);
        writer.put_scalar(&self.taux);
        writer.put_scalar(&self.mu);
        writer.put_scalar(&self.t_hat);
        self.ipp.write_to(&mut writer);
        writer.into_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> ZetherResult<Self> {
        let mut reader = ByteReader::new(bytes);
        let v = reader.read_points()?;
        if v.is_empty() {
            return Err(ZetherError::DecodeError("no value commitments".to_string()));
        }
        let proof = Self {
            v,
            a: reader.read_point()?,
            s: reader.read_point()?,
            t1: reader.read_point()?,
            t2: reader.read_point()?,
            taux: reader.read_scalar()?,
            mu: reader.read_scalar()?,
            t_hat: reader.read_scalar()?,
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

/// A range proof that one committed value lies in `[0, 2^n)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletProof {
    /// Value commitment `V = v·g + γ·h`
    pub v: Point,
    pub a: Point,
    pub s: Point,
    pub t1: Point,
    pub t2: Point,
    pub taux: Scalar,
    pub mu: Scalar,
    pub t_hat: Scalar,
    pub ipp: InnerProductProof,
}

impl BulletProof {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        writer.put_point(&self.v);
        write_transcript(&mut writer, self.a, self.s, self.t1, self.t2);
        writer.put_scalar(&self.taux);
        writer.put_scalar(&self.mu);
        writer.put_scalar(&self.t_hat);
        self.ipp.write_to(&mut writer);
        writer.into_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> ZetherResult<Self> {
        let mut reader = ByteReader::new(bytes);
        let proof = Self {
            v: reader.read_point()?,
            a: reader.read_point()?,
            s: reader.read_point()?,
            t1: reader.read_point()?,
            t2: reader.read_point()?,
            taux: reader.read_scalar()?,
            mu: reader.read_scalar()?,
            t_hat: reader.read_scalar()?,
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

impl From<BulletProof> for AggBulletProof {
    fn from(proof: BulletProof) -> Self {
        Self {
            v: vec![proof.v],
            a: proof.a,
            s: proof.s,
            t1: proof.t1,
            t2: proof.t2,
            taux: proof.taux,
            mu: proof.mu,
            t_hat: proof.t_hat,
            ipp: proof.ipp,
        }
    }
}

impl TryFrom<AggBulletProof> for BulletProof {
    type Error = ZetherError;

    fn try_from(proof: AggBulletProof) -> ZetherResult<Self> {
        if proof.v.len() != 1 {
            return Err(ZetherError::length(1, proof.v.len()));
        }
        Ok(Self {
            v: proof.v[0],
            a: proof.a,
            s: proof.s,
            t1: proof.t1,
            t2: proof.t2,
            taux: proof.taux,
            mu: proof.mu,
            t_hat: proof.t_hat,
            ipp: proof.ipp,
        })
    }
}

fn write_transcript(writer: &mut ByteWriter, a: Point, s: Point, t1: Point, t2: Point) {
    for point in [a, s, t1, t2] {
        writer.put_point(&point);
    }
}

zether_core::impl_hex_serde!(AggBulletProof);
zether_core::impl_hex_serde!(BulletProof);
