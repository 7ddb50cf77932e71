//! Fidelity fingerprints
//!
//! Provides [`Fingerprint`], the 32-byte digest the engine stores in a
//! record's side channel to remember what a field-group looked like the
//! last time it crossed a version boundary.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A 32-byte BLAKE3 digest of a normalized field-group value
///
/// The text form (hex, 64 chars) is what lands in annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Wrap raw digest bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Build from a byte slice
    ///
    /// # Errors
    /// Returns error if slice length is not exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, HashError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| HashError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    /// Digest arbitrary bytes
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Digest the canonical JSON encoding of a value
    ///
    /// Struct fields serialize in declaration order and maps used in API
    /// types are `BTreeMap`s, so equal values always yield equal bytes.
    ///
    /// # Errors
    /// Returns error if the value cannot be encoded as JSON
    pub fn of<T>(value: &T) -> Result<Self, HashError>
    where
        T: serde::Serialize + ?Sized,
    {
        let json = serde_json::to_vec(value)?;
        Ok(Self::compute(&json))
    }

    /// First 16 hex chars, for log lines
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Fingerprint {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }
}

impl serde::Serialize for Fingerprint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Fingerprint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when producing or parsing fingerprints
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// Invalid digest length
    #[error("invalid fingerprint length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Hex decoding error
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Value could not be encoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    #[test]
    fn compute_is_deterministic() {
        assert_eq!(Fingerprint::compute(b"spec"), Fingerprint::compute(b"spec"));
        assert_ne!(Fingerprint::compute(b"spec"), Fingerprint::compute(b"status"));
    }

    #[test]
    fn from_slice_rejects_wrong_length() {
        let result = Fingerprint::from_slice(&[0u8; 31]);
        assert!(matches!(
            result,
            Err(HashError::InvalidLength { expected: 32, actual: 31 })
        ));
    }

    #[test]
    fn text_form_parses_back() {
        let fp = Fingerprint::compute(b"cluster");
        let text = fp.to_string();
        assert_eq!(text.len(), 64);
        assert_eq!(text.parse::<Fingerprint>().unwrap(), fp);
        assert!(text.starts_with(&fp.short()));
    }

    #[test]
    fn garbage_text_is_rejected() {
        assert!(matches!(
            "not-hex".parse::<Fingerprint>(),
            Err(HashError::HexDecode(_))
        ));
        assert!(matches!(
            "abcd".parse::<Fingerprint>(),
            Err(HashError::InvalidLength { .. })
        ));
    }

    #[test]
    fn map_order_does_not_matter() {
        let mut a = BTreeMap::new();
        a.insert("zone", "a");
        a.insert("flavor", "m1");
        let mut b = BTreeMap::new();
        b.insert("flavor", "m1");
        b.insert("zone", "a");
        assert_eq!(Fingerprint::of(&a).unwrap(), Fingerprint::of(&b).unwrap());
    }

    #[test]
    fn serde_uses_hex_string() {
        let fp = Fingerprint::compute(b"x");
        let json = serde_json::to_string(&fp).unwrap();
        assert_eq!(json, format!("\"{fp}\""));
        let back: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fp);
    }

    proptest! {
        #[test]
        fn of_matches_compute_over_json(s in ".*", n in any::<i64>()) {
            let value = (s.clone(), n);
            let expected = Fingerprint::compute(&serde_json::to_vec(&value).unwrap());
            prop_assert_eq!(Fingerprint::of(&value).unwrap(), expected);
        }
    }
}
