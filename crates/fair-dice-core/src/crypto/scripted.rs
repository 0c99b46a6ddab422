//! Scripted entropy source for testing.

use super::random::EntropySource;
use crate::error::{GameError, Result};
use std::collections::VecDeque;

/// Replays queued bytes in order, failing once they run out.
///
/// A fair-exchange commit consumes 32 bytes for the key and then one or
/// more 32-byte candidates for the committed value, so a test can force an
/// exact round with one [`push_bytes`](Self::push_bytes) for the key and one
/// [`push_value`](Self::push_value) for the value.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEntropy {
    bytes: VecDeque<u8>,
}

impl ScriptedEntropy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue raw bytes
    pub fn push_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.bytes.extend(bytes);
        self
    }

    /// Queue a 256-bit candidate that `uniform_int` accepts and reduces to
    /// `value` for any range greater than `value`
    pub fn push_value(&mut self, value: u64) -> &mut Self {
        let mut candidate = [0u8; 32];
        candidate[24..].copy_from_slice(&value.to_be_bytes());
        self.push_bytes(&candidate)
    }

    /// Bytes not consumed yet
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

impl EntropySource for ScriptedEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        let wanted = dest.len();
        if wanted > self.bytes.len() {
            return Err(GameError::EntropyUnavailable(format!(
                "script exhausted: wanted {} bytes, {} left",
                wanted,
                self.bytes.len()
            )));
        }
        for (slot, byte) in dest.iter_mut().zip(self.bytes.drain(..wanted)) {
            *slot = byte;
        }
        Ok(())
    }
}
