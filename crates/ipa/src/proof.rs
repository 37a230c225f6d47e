//! Inner Product Argument proof structure

use zether_core::{ByteReader, ByteWriter, Point, Scalar, ZetherError, ZetherResult};
use zether_core::{POINT_BYTES, SCALAR_BYTES};

/// An inner product argument proof
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerProductProof {
    /// L values from each folding round (log_2(n) elements)
    pub l_vec: Vec<Point>,
    /// R values from each folding round (log_2(n) elements)
    pub r_vec: Vec<Point>,
    /// Final scalar value a
    pub a: Scalar,
    /// Final scalar value b
    pub b: Scalar,
}

impl InnerProductProof {
    pub fn new(l_vec: Vec<Point>, r_vec: Vec<Point>, a: Scalar, b: Scalar) -> Self {
        Self { l_vec, r_vec, a, b }
    }

    /// Get the number of folding rounds
    pub fn num_rounds(&self) -> usize {
        self.l_vec.len()
    }

    /// Validate proof structure
    pub fn validate_structure(&self) -> ZetherResult<()> {
        if self.l_vec.len() != self.r_vec.len() {
            return Err(ZetherError::ProofInvalid(format!(
                "{} L values but {} R values",
                self.l_vec.len(),
                self.r_vec.len()
            )));
        }

        // Empty L/R vectors are valid for base case (vector length 1)
        Ok(())
    }

    /// Get proof size in bytes
    pub fn size_bytes(&self) -> usize {
        4 + 2 * self.num_rounds() * POINT_BYTES + 2 * SCALAR_BYTES
    }

    /// Round count, then L points, R points, `a`, `b`
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.put_u32(self.l_vec.len() as u32);
        for point in self.l_vec.iter().chain(self.r_vec.iter()) {
            writer.put_point(point);
        }
        writer.put_scalar(&self.a);
        writer.put_scalar(&self.b);
    }

    pub fn read_from(reader: &mut ByteReader<'_>) -> ZetherResult<Self> {
        let rounds = reader.read_u32()? as usize;
        // 64 rounds would already fold vectors of length 2^64
        if rounds > 64 {
            return Err(ZetherError::DecodeError(format!("{} folding rounds", rounds)));
        }

        let l_vec = (0..rounds)
            .map(|_| reader.read_point())
            .collect::<ZetherResult<Vec<_>>>()?;
        let r_vec = (0..rounds)
            .map(|_| reader.read_point())
            .collect::<ZetherResult<Vec<_>>>()?;
        let a = reader.read_scalar()?;
        let b = reader.read_scalar()?;

        Ok(Self { l_vec, r_vec, a, b })
    }

    /// Serialize proof to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(self.size_bytes());
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Deserialize proof from bytes
    pub fn from_bytes(bytes: &[u8]) -> ZetherResult<Self> {
        let mut reader = ByteReader::new(bytes);
        let proof = Self::read_from(&mut reader)?;
        reader.finish()?;
        Ok(proof)
    }
}

zether_core::impl_hex_serde!(InnerProductProof);
