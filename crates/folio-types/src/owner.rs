use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// An external caller identity, e.g. an account address.
///
/// Folio never creates or destroys owners. They are supplied by the
/// surrounding environment as the "current caller" of an operation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Owner([u8; 32]);

impl Owner {
    /// Derive the owner address for an ed25519-style public key.
    pub fn from_public_key(public_key: &[u8; 32]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"folio-owner-v1:pubkey:");
        hasher.update(public_key);
        Self(*hasher.finalize().as_bytes())
    }

    /// Use raw address bytes as-is.
    pub fn from_raw(address: [u8; 32]) -> Self {
        Self(address)
    }

    /// Create a random owner for tests and demos.
    pub fn ephemeral() -> Self {
        let mut bytes = [0u8; 32];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
        Self::from_public_key(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short identifier (first 8 hex characters).
    pub fn short_id(&self) -> String {
        format!("owner:{}", hex::encode(&self.0[..4]))
    }

    /// Parse from 64 hex characters, accepting a `0x` or `owner:` prefix.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s
            .strip_prefix("owner:")
            .or_else(|| s.strip_prefix("0x"))
            .unwrap_or(s);
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

impl fmt::Debug for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Owner({})", self.short_id())
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}
