//! Public statement and secret witness of a transfer

use zether_core::{
    is_power_of_two, log2_exact, ByteReader, ByteWriter, Point, Scalar, ZetherError, ZetherResult,
};

/// Everything a verifier sees about a transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferStatement {
    /// Ring of public keys, `N = 2^m` members
    pub anon_pk: Vec<Point>,
    /// Left ciphertext halves after the transfer is applied
    pub cln_new: Vec<Point>,
    /// Right ciphertext halves after the transfer is applied
    pub crn_new: Vec<Point>,
    /// Per-member adjustment `b_i·G + r·pk_i`
    pub c_vector: Vec<Point>,
    /// `D = r·G`
    pub d: Point,
    /// `u = sk·G_epoch`
    pub nonce_u: Point,
    pub epoch: u64,
}

impl TransferStatement {
    pub fn ring_size(&self) -> usize {
        self.anon_pk.len()
    }

    /// Check every vector has the ring's length and return `m = log2(N)`
    pub fn validate(&self, max_ring_size: usize) -> ZetherResult<usize> {
        let n = self.ring_size();
        if n < 4 || !is_power_of_two(n) {
            return Err(ZetherError::InvalidParameters(format!(
                "ring size {} must be a power of two of at least 4",
                n
            )));
        }
        if n > max_ring_size {
            return Err(ZetherError::InvalidParameters(format!(
                "ring size {} exceeds the configured maximum {}",
                n, max_ring_size
            )));
        }
        for len in [self.cln_new.len(), self.crn_new.len(), self.c_vector.len()] {
            if len != n {
                return Err(ZetherError::length(n, len));
            }
        }
        log2_exact(n)
    }

    /// Canonical encoding, also the statement part of the first challenge
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        writer.put_points(&self.anon_pk);
        writer.put_points(&self.cln_new);
        writer.put_points(&self.crn_new);
        writer.put_points(&self.c_vector);
        writer.put_point(&self.d);
        writer.put_point(&self.nonce_u);
        writer.put_bytes(&self.epoch.to_be_bytes());
        writer.into_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> ZetherResult<Self> {
        let mut reader = ByteReader::new(bytes);
        let anon_pk = reader.read_points()?;
        let cln_new = reader.read_points()?;
        let crn_new = reader.read_points()?;
        let c_vector = reader.read_points()?;
        let d = reader.read_point()?;
        let nonce_u = reader.read_point()?;
        let mut epoch = [0u8; 8];
        epoch.copy_from_slice(reader.take(8)?);
        reader.finish()?;
        Ok(Self {
            anon_pk,
            cln_new,
            crn_new,
            c_vector,
            d,
            nonce_u,
            epoch: u64::from_be_bytes(epoch),
        })
    }
}

/// The sender's secrets behind a [`TransferStatement`]
#[derive(Clone)]
pub struct TransferWitness {
    pub sk: Scalar,
    /// Amount moved to the receiver
    pub amount: u64,
    /// Sender balance left after the transfer
    pub remaining: u64,
    /// Randomness shared by `D` and every `c_vector` entry
    pub r: Scalar,
    /// Sender index in the ring
    pub l0: usize,
    /// Receiver index in the ring
    pub l1: usize,
}

impl TransferWitness {
    /// Index checks against a ring of `n` members
    pub fn validate(&self, n: usize) -> ZetherResult<()> {
        if self.l0 >= n || self.l1 >= n {
            return Err(ZetherError::InvalidWitness(format!(
                "ring indices ({}, {}) outside a ring of {}",
                self.l0, self.l1, n
            )));
        }
        if self.l0 == self.l1 {
            return Err(ZetherError::SelfTransferDisallowed);
        }
        if self.l0 % 2 == self.l1 % 2 {
            return Err(ZetherError::InvalidWitness(
                "sender and receiver indices must have opposite parity".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for TransferWitness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TransferWitness { .. }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zether_core::map_into_group;

    fn statement(n: usize) -> TransferStatement {
        let base = map_into_group("statement test");
        let points: Vec<Point> = (1..=n as u64).map(|i| base * Scalar::from(i)).collect();
        TransferStatement {
            anon_pk: points.clone(),
            cln_new: points.clone(),
            crn_new: points.clone(),
            c_vector: points,
            d: base,
            nonce_u: base * Scalar::from(99u64),
            epoch: 200,
        }
    }

    #[test]
    fn test_validate() {
        assert_eq!(statement(8).validate(1024).unwrap(), 3);
        assert!(statement(8).validate(4).is_err());
        assert!(statement(2).validate(1024).is_err());

        let mut bad = statement(8);
        bad.c_vector.pop();
        assert!(matches!(bad.validate(1024), Err(ZetherError::VectorLengthMismatch { .. })));
    }

    #[test]
    fn test_statement_encoding() {
        let s = statement(4);
        let bytes = s.to_bytes();
        assert_eq!(&bytes[bytes.len() - 8..], &200u64.to_be_bytes());
        assert_eq!(TransferStatement::from_bytes(&bytes).unwrap(), s);
        assert!(TransferStatement::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn test_witness_indices() {
        let witness = |l0, l1| TransferWitness {
            sk: Scalar::from(1u64),
            amount: 1,
            remaining: 1,
            r: Scalar::from(1u64),
            l0,
            l1,
        };
        witness(0, 1).validate(4).unwrap();
        witness(3, 0).validate(4).unwrap();
        assert!(matches!(witness(2, 2).validate(4), Err(ZetherError::SelfTransferDisallowed)));
        assert!(matches!(witness(0, 2).validate(4), Err(ZetherError::InvalidWitness(_))));
        assert!(witness(0, 5).validate(4).is_err());
        assert_eq!(format!("{:?}", witness(0, 1)), "TransferWitness { .. }");
    }
}
