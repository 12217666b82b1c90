use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Globally unique identity of a container (a profile or a folder).
///
/// Identities are never reused. They are minted by an allocator supplied by
/// the embedding environment; this type only carries and compares them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId([u8; 32]);

impl ObjectId {
    /// Derive an `ObjectId` from a namespace and seed material.
    ///
    /// The same `(namespace, seed)` pair always yields the same id.
    pub fn derive(namespace: &str, seed: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"folio-object-v1:");
        hasher.update(namespace.as_bytes());
        hasher.update(b":");
        hasher.update(seed);
        Self(*hasher.finalize().as_bytes())
    }

    /// Create an `ObjectId` from raw bytes.
    pub fn from_raw(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The null object ID (all zeros). Never handed out by an allocator.
    pub const fn null() -> Self {
        Self([0u8; 32])
    }

    /// Returns `true` if this is the null object ID.
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.short_hex())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl From<[u8; 32]> for ObjectId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_is_deterministic() {
        let id1 = ObjectId::derive("folio", b"seed");
        let id2 = ObjectId::derive("folio", b"seed");
        assert_eq!(id1, id2);
    }

    #[test]
    fn namespace_separates_ids() {
        let id1 = ObjectId::derive("alpha", b"seed");
        let id2 = ObjectId::derive("beta", b"seed");
        assert_ne!(id1, id2);
    }

    #[test]
    fn derived_ids_are_never_null() {
        assert!(!ObjectId::derive("folio", b"").is_null());
        assert!(ObjectId::null().is_null());
    }

    #[test]
    fn hex_roundtrip_with_and_without_prefix() {
        let id = ObjectId::derive("folio", b"hex");
        assert_eq!(ObjectId::from_hex(&id.to_hex()).unwrap(), id);
        assert_eq!(ObjectId::from_hex(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn from_hex_rejects_short_input() {
        let err = ObjectId::from_hex("abcd").unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 32,
                actual: 2
            }
        );
    }

    #[test]
    fn display_has_prefix() {
        let id = ObjectId::from_raw([0xab; 32]);
        let display = id.to_string();
        assert!(display.starts_with("0x"));
        assert_eq!(display.len(), 66);
        assert_eq!(format!("{id:?}"), "ObjectId(abababab)");
    }

    #[test]
    fn serde_roundtrip() {
        let id = ObjectId::derive("folio", b"serde");
        let json = serde_json::to_string(&id).unwrap();
        let parsed: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
