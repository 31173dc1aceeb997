//! Stable hashing for plan summaries and run manifests (BLAKE3).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }

    /// First 12 hex chars, enough to tell two plans apart on screen.
    pub fn short(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(12);
        hex
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

pub fn hash_bytes(bytes: &[u8]) -> Hash256 {
    Hash256(*blake3::hash(bytes).as_bytes())
}

/// Hash any serde-serializable value deterministically (via JSON).
pub fn hash_serde<T: Serialize>(v: &T) -> Result<Hash256> {
    let bytes = serde_json::to_vec(v).map_err(|e| Error::Hash(e.to_string()))?;
    Ok(hash_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_64_chars_and_stable() {
        let a = hash_bytes(b"2024-01-01 -> 2024-01-07");
        let b = hash_bytes(b"2024-01-01 -> 2024-01-07");
        assert_eq!(a, b);
        assert_eq!(a.to_hex().len(), 64);
        assert_eq!(a.short().len(), 12);
        assert!(a.to_hex().starts_with(&a.short()));
        assert_ne!(a, hash_bytes(b"2024-01-01 -> 2024-01-08"));
    }

    #[test]
    fn serde_hash_matches_json_bytes() {
        let v = vec![7u32, 14, 21];
        let expected = hash_bytes(&serde_json::to_vec(&v).unwrap());
        assert_eq!(hash_serde(&v).unwrap(), expected);
    }
}
