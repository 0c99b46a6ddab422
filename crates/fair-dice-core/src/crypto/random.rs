//! Secure randomness: entropy sources and unbiased integers in a range.

use super::SecretKey;
use crate::error::{GameError, Result};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::trace;

/// Bit width of every candidate drawn by [`SecureRandom::uniform_int`]
pub const CANDIDATE_BITS: usize = 256;

const CANDIDATE_BYTES: usize = CANDIDATE_BITS / 8;

/// Anything that can produce cryptographically unpredictable bytes
pub trait EntropySource {
    /// Fill `dest` entirely, or fail with [`GameError::EntropyUnavailable`]
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()>;
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_bytes(dest)
    }
}

/// Operating system entropy. The only source used outside of tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| GameError::EntropyUnavailable(e.to_string()))
    }
}

/// Adapter for any cryptographic `rand` generator, e.g. a seeded `StdRng`
/// when a test needs a reproducible stream.
#[derive(Clone, Debug)]
pub struct RngEntropy<R>(R);

impl<R: RngCore + CryptoRng> RngEntropy<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl<R: RngCore + CryptoRng> EntropySource for RngEntropy<R> {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        self.0
            .try_fill_bytes(dest)
            .map_err(|e| GameError::EntropyUnavailable(e.to_string()))
    }
}

/// Secure byte and integer generation over an injected entropy source.
///
/// Integers come from 256-bit candidates with rejection sampling, so every
/// value in `0..range` is exactly equally likely.
#[derive(Clone, Debug, Default)]
pub struct SecureRandom<E = OsEntropy> {
    source: E,
}

impl SecureRandom<OsEntropy> {
    /// Generator backed by the operating system
    pub fn os() -> Self {
        Self { source: OsEntropy }
    }
}

impl<E: EntropySource> SecureRandom<E> {
    pub fn new(source: E) -> Self {
        Self { source }
    }

    /// `n` unpredictable bytes
    pub fn random_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; n];
        self.source.fill_bytes(&mut bytes)?;
        Ok(bytes)
    }

    /// A fresh 256-bit commitment key
    pub fn secret_key(&mut self) -> Result<SecretKey> {
        let mut bytes = [0u8; 32];
        self.source.fill_bytes(&mut bytes)?;
        Ok(SecretKey::from_bytes(bytes))
    }

    /// Uniform integer in `0..range`.
    ///
    /// A candidate `c` in `[0, 2^256)` is accepted only when
    /// `c < floor(2^256 / range) * range`; otherwise a new one is drawn.
    pub fn uniform_int(&mut self, range: u64) -> Result<u64> {
        if range == 0 {
            return Err(GameError::InvalidRange(range));
        }

        let excess = pow2_256_mod(range);
        loop {
            let mut candidate = [0u8; CANDIDATE_BYTES];
            self.source.fill_bytes(&mut candidate)?;

            if !in_rejection_zone(&candidate, excess) {
                return Ok(reduce(&candidate, range));
            }
            trace!(range, "candidate in rejection zone, redrawing");
        }
    }
}

/// `2^256 mod m`, the size of the biased tail at the top of the candidate space
fn pow2_256_mod(m: u64) -> u64 {
    let m = m as u128;
    // 2^128 mod m, squared
    let half = (u128::MAX % m + 1) % m;
    (half * half % m) as u64
}

/// Is `candidate >= 2^256 - excess`?
///
/// Equivalent to `(2^256 - 1 - candidate) < excess`, and the left side is
/// the bitwise complement of the candidate.
fn in_rejection_zone(candidate: &[u8; CANDIDATE_BYTES], excess: u64) -> bool {
    if excess == 0 {
        return false;
    }

    let (high, low) = candidate.split_at(CANDIDATE_BYTES - 8);
    if high.iter().any(|&b| b != 0xff) {
        return false;
    }

    let mut tail = [0u8; 8];
    tail.copy_from_slice(low);
    !u64::from_be_bytes(tail) < excess
}

/// Big-endian candidate modulo `m`
fn reduce(candidate: &[u8], m: u64) -> u64 {
    let m = m as u128;
    candidate
        .iter()
        .fold(0u128, |acc, &b| (acc * 256 + b as u128) % m) as u64
}
