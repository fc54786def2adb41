use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{RegistryError, RegistryResult};

use super::decode_fixed_hex;

pub const RECORD_HASH_LEN: usize = 32;

/// Fixed-width digest identifying off-chain record content.
///
/// The registry never hashes content itself; clients submit whatever 32-byte
/// digest they computed (keccak256 in the web application). [`RecordHash::digest`]
/// is provided for callers that have no hashing of their own.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RecordHash([u8; RECORD_HASH_LEN]);

impl RecordHash {
    pub const fn from_bytes(bytes: [u8; RECORD_HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> RegistryResult<Self> {
        let bytes: [u8; RECORD_HASH_LEN] = bytes.try_into().map_err(|_| {
            RegistryError::ValidationError(format!(
                "record hash must be {RECORD_HASH_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// BLAKE3 digest of `content`.
    pub fn digest(content: &[u8]) -> Self {
        Self(*blake3::hash(content).as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; RECORD_HASH_LEN] {
        &self.0
    }
}

impl fmt::Display for RecordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for RecordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordHash({self})")
    }
}

impl FromStr for RecordHash {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed_hex::<RECORD_HASH_LEN>(s, "record hash").map(Self)
    }
}

impl From<[u8; RECORD_HASH_LEN]> for RecordHash {
    fn from(bytes: [u8; RECORD_HASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl Serialize for RecordHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_stable() {
        let a = RecordHash::digest(b"Rabies vaccination - 2024-01-15");
        let b = RecordHash::digest(b"Rabies vaccination - 2024-01-15");
        let c = RecordHash::digest(b"Annual checkup - 2024-01-20");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_accepts_client_side_keccak_digest() {
        // keccak256("") as printed by ethers.js
        let hex = "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470";
        let hash: RecordHash = hex.parse().unwrap();
        assert_eq!(hash.to_string(), hex);
        assert_eq!(hash.as_bytes()[0], 0xc5);
    }

    #[test]
    fn test_from_slice_rejects_short_input() {
        assert!(RecordHash::from_slice(&[0u8; 31]).is_err());
        assert!(RecordHash::from_slice(&[0u8; 32]).is_ok());
    }
}
