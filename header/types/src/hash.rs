use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DecodeError;

/// Length in bytes of every header digest.
pub const HASH_LEN: usize = 32;

/// Hash is a 32-byte array which is used to represent a hash result.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash([u8; HASH_LEN]);

impl Hash {
    pub const ZERO: Hash = Hash([0; HASH_LEN]);

    pub const fn new(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; HASH_LEN]
    }

    /// Parses a hash field from its wire form. Empty input is the zero hash,
    /// which is what zero-value headers carry.
    pub(crate) fn from_field(field: &'static str, bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            return Ok(Self::ZERO);
        }
        Self::try_from(bytes).map_err(|_| DecodeError::InvalidHashLength {
            field,
            len: bytes.len(),
        })
    }
}

impl From<[u8; HASH_LEN]> for Hash {
    fn from(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Hash> for [u8; HASH_LEN] {
    fn from(hash: Hash) -> Self {
        hash.0
    }
}

impl TryFrom<&[u8]> for Hash {
    type Error = core::array::TryFromSliceError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; HASH_LEN]>::try_from(bytes).map(Self)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Hash> for tendermint::Hash {
    fn from(hash: Hash) -> Self {
        tendermint::Hash::Sha256(hash.0)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({self})")
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let mut bytes = [0u8; HASH_LEN];
        hex::decode_to_slice(&s, &mut bytes).map_err(serde::de::Error::custom)?;
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_upper_hex() {
        let hash = Hash::new([0xab; HASH_LEN]);
        assert_eq!(hash.to_string(), "AB".repeat(HASH_LEN));
    }

    #[test]
    fn test_try_from_rejects_wrong_length() {
        assert!(Hash::try_from(&[0u8; 31][..]).is_err());
        assert!(Hash::try_from(&[0u8; 33][..]).is_err());
        assert_eq!(Hash::try_from(&[7u8; 32][..]).unwrap(), Hash::new([7; 32]));
    }

    #[test]
    fn test_from_field_accepts_empty_as_zero() {
        assert_eq!(Hash::from_field("data_hash", &[]).unwrap(), Hash::ZERO);
        assert!(matches!(
            Hash::from_field("data_hash", &[1, 2, 3]),
            Err(DecodeError::InvalidHashLength {
                field: "data_hash",
                len: 3
            })
        ));
    }

    #[test]
    fn test_into_tendermint_hash() {
        let hash = Hash::new([0x11; HASH_LEN]);
        let tm: tendermint::Hash = hash.into();
        assert_eq!(tm.as_bytes(), hash.as_ref());
    }

    #[test]
    fn test_serde_hex_string() {
        let hash = Hash::new([0x0f; HASH_LEN]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", "0f".repeat(HASH_LEN)));
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);

        let upper_json = format!("\"{}\"", "0F".repeat(HASH_LEN));
        let upper: Hash = serde_json::from_str(&upper_json).unwrap();
        assert_eq!(upper, hash);
    }
}
