//! Cryptographic primitives for fair dice rounds.
//!
//! This module provides:
//! - EntropySource and SecureRandom for unbiased secure randomness
//! - SecretKey and Commitment for the commit-reveal scheme
//! - ScriptedEntropy, a replaying source for deterministic tests

mod commitment;
mod random;
mod scripted;

pub use commitment::{commit, verify, verify_hex, Commitment, SecretKey};
pub use random::{EntropySource, OsEntropy, RngEntropy, SecureRandom, CANDIDATE_BITS};
pub use scripted::ScriptedEntropy;

/// Hex (de)serialization for 32-byte values
pub(crate) mod hex_bytes {
    use crate::error::{GameError, Result};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn decode(s: &str) -> Result<[u8; 32]> {
        let bytes = hex::decode(s.trim())?;
        if bytes.len() != 32 {
            return Err(GameError::InvalidHex(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(arr)
    }

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> std::result::Result<S::Ok, S::Error> {
        hex::encode(bytes).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<[u8; 32], D::Error> {
        let hex_str = String::deserialize(d)?;
        decode(&hex_str).map_err(serde::de::Error::custom)
    }
}
