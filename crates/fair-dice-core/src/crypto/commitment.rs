//! SecretKey and Commitment for the commit-reveal scheme.

use super::hex_bytes;
use crate::error::Result;
use hmac::digest::Key;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha3::Sha3_256;
use std::fmt;
use subtle::ConstantTimeEq;

type HmacSha3_256 = Hmac<Sha3_256>;

/// 256-bit key binding one committed value. Fresh for every round.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKey(#[serde(with = "hex_bytes")] [u8; 32]);

impl SecretKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from 64 hex characters
    pub fn from_hex(s: &str) -> Result<Self> {
        hex_bytes::decode(s).map(Self)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex, the form shown to the peer on reveal
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({}..)", hex::encode(&self.0[..4]))
    }
}

/// Commitment = HMAC-SHA3-256(key, decimal(value))
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment(#[serde(with = "hex_bytes")] [u8; 32]);

impl Commitment {
    /// Commit to `value` under `key`.
    ///
    /// HMAC zero-pads keys shorter than the hash block, so the key is placed
    /// in a full block up front and the infallible constructor applies.
    pub fn new(key: &SecretKey, value: u64) -> Self {
        let mut block = Key::<HmacSha3_256>::default();
        block[..32].copy_from_slice(key.as_bytes());
        let mut mac = <HmacSha3_256 as Mac>::new(&block);
        mac.update(value.to_string().as_bytes());
        Self(mac.finalize().into_bytes().into())
    }

    /// Parse a published 64-character hex digest
    pub fn from_hex(s: &str) -> Result<Self> {
        hex_bytes::decode(s).map(Self)
    }

    /// Check that `key` and `value` produce this commitment, in constant time
    pub fn verify(&self, key: &SecretKey, value: u64) -> bool {
        let expected = Self::new(key, value);
        self.0[..].ct_eq(&expected.0[..]).into()
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Digest binding `value` to `key`
pub fn commit(key: &SecretKey, value: u64) -> Commitment {
    Commitment::new(key, value)
}

/// Recompute the digest for `key` and `value` and compare it to `digest`
pub fn verify(key: &SecretKey, value: u64, digest: &Commitment) -> bool {
    digest.verify(key, value)
}

/// [`verify`] over the hex forms a peer copies from the console
pub fn verify_hex(key_hex: &str, value: u64, digest_hex: &str) -> Result<bool> {
    let key = SecretKey::from_hex(key_hex)?;
    let digest = Commitment::from_hex(digest_hex)?;
    Ok(verify(&key, value, &digest))
}
