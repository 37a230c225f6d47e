//! Canonical byte encoding shared by proofs, ciphertexts and signatures
//!
//! Fixed-size fields are written back to back; point and scalar vectors are
//! preceded by a `u32` little-endian element count.

use crate::{scalar_from_bytes, scalar_to_bytes, Point, Scalar, ZetherError, ZetherResult};
use crate::{POINT_BYTES, SCALAR_BYTES};

/// Append-only encoder
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_point(&mut self, point: &Point) {
        self.buf.extend_from_slice(&point.to_bytes());
    }

    pub fn put_scalar(&mut self, scalar: &Scalar) {
        self.buf.extend_from_slice(&scalar_to_bytes(scalar));
    }

    /// Write a count-prefixed point vector
    pub fn put_points(&mut self, points: &[Point]) {
        self.put_u32(points.len() as u32);
        for point in points {
            self.put_point(point);
        }
    }

    /// Write a count-prefixed scalar vector
    pub fn put_scalars(&mut self, scalars: &[Scalar]) {
        self.put_u32(scalars.len() as u32);
        for scalar in scalars {
            self.put_scalar(scalar);
        }
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over an encoded buffer; every read is bounds-checked
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    pub fn take(&mut self, len: usize) -> ZetherResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(ZetherError::DecodeError(format!(
                "need {} bytes at offset {}, only {} left",
                len,
                self.offset,
                self.remaining()
            )));
        }
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub fn read_u32(&mut self) -> ZetherResult<u32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(buf))
    }

    pub fn read_u64(&mut self) -> ZetherResult<u64> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8)?);
        Ok(u64::from_le_bytes(buf))
    }

    pub fn read_point(&mut self) -> ZetherResult<Point> {
        Point::from_bytes(self.take(POINT_BYTES)?)
    }

    pub fn read_scalar(&mut self) -> ZetherResult<Scalar> {
        scalar_from_bytes(self.take(SCALAR_BYTES)?)
    }

    pub fn read_points(&mut self) -> ZetherResult<Vec<Point>> {
        let count = self.read_count(POINT_BYTES)?;
        (0..count).map(|_| self.read_point()).collect()
    }

    pub fn read_scalars(&mut self) -> ZetherResult<Vec<Scalar>> {
        let count = self.read_count(SCALAR_BYTES)?;
        (0..count).map(|_| self.read_scalar()).collect()
    }

    /// Fail unless the whole buffer was consumed
    pub fn finish(self) -> ZetherResult<()> {
        if self.remaining() != 0 {
            return Err(ZetherError::DecodeError(format!(
                "{} trailing bytes",
                self.remaining()
            )));
        }
        Ok(())
    }

    // Counts are checked against the remaining input before anything is allocated.
    fn read_count(&mut self, element_size: usize) -> ZetherResult<usize> {
        let count = self.read_u32()? as usize;
        if count.saturating_mul(element_size) > self.remaining() {
            return Err(ZetherError::DecodeError(format!(
                "vector of {} elements exceeds remaining {} bytes",
                count,
                self.remaining()
            )));
        }
        Ok(count)
    }
}

/// Decode hex text into bytes
pub fn decode_hex(s: &str) -> ZetherResult<Vec<u8>> {
    hex::decode(s.trim_start_matches("0x")).map_err(|e| ZetherError::DecodeError(e.to_string()))
}

/// Implement `Serialize`/`Deserialize` as a hex string of the canonical bytes.
///
/// The type must provide `to_bytes(&self)` returning something `AsRef<[u8]>`
/// and `from_bytes(&[u8]) -> ZetherResult<Self>`.
#[macro_export]
macro_rules! impl_hex_serde {
    ($ty:ty) => {
        impl $crate::__private::serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.serialize_str(&$crate::__private::hex::encode(self.to_bytes()))
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                use $crate::__private::serde::de::Error;
                let text = <String as $crate::__private::serde::Deserialize>::deserialize(deserializer)?;
                let bytes = $crate::codec::decode_hex(&text).map_err(D::Error::custom)?;
                <$ty>::from_bytes(&bytes).map_err(D::Error::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::One;

    #[test]
    fn test_vector_prefix() {
        let mut writer = ByteWriter::new();
        writer.put_scalars(&[Scalar::one(), Scalar::from(2u64)]);
        let bytes = writer.into_bytes();
        assert_eq!(&bytes[..4], &2u32.to_le_bytes());
        assert_eq!(bytes.len(), 4 + 2 * SCALAR_BYTES);

        let mut reader = ByteReader::new(&bytes);
        let scalars = reader.read_scalars().unwrap();
        assert_eq!(scalars, vec![Scalar::one(), Scalar::from(2u64)]);
        reader.finish().unwrap();
    }

    #[test]
    fn test_oversized_count_rejected() {
        let mut writer = ByteWriter::new();
        writer.put_u32(u32::MAX);
        writer.put_point(&Point::identity());
        let bytes = writer.into_bytes();
        assert!(ByteReader::new(&bytes).read_points().is_err());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut writer = ByteWriter::new();
        writer.put_u64(9);
        writer.put_bytes(&[1]);
        let bytes = writer.into_bytes();
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_u64().unwrap(), 9);
        assert!(reader.finish().is_err());
    }

    #[test]
    fn test_point_serde_json() {
        let point = Point::identity();
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, format!("\"{}\"", "0".repeat(128)));
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
        assert!(serde_json::from_str::<Point>("\"zz\"").is_err());
    }
}
