//! One commit-reveal round.
//!
//! The committing side draws a fresh key and a uniform value, publishes only
//! the HMAC of the value, takes the peer's contribution and combines the two
//! modulo the round's range. The key and value are disclosed on reveal so
//! the peer can recompute the digest.
//!
//! ```text
//! CommittedRound --contribute()--> CommittedRound --reveal()--> RevealedRound
//! ```
//!
//! `reveal` consumes the committed round, so a round cannot be revealed
//! twice or take a contribution after it was revealed.

use crate::crypto::{Commitment, EntropySource, SecretKey, SecureRandom};
use crate::error::{GameError, Result};
use crate::protocol::{CommitAnnouncement, RoundId, RoundPurpose};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// `(committed + contribution) mod range`.
///
/// Uniform whenever either input is uniform and independent of the other.
pub fn combine(committed: u64, contribution: u64, range: u64) -> Result<u64> {
    if range == 0 {
        return Err(GameError::InvalidRange(range));
    }
    Ok(((committed as u128 + contribution as u128) % range as u128) as u64)
}

/// A round whose digest is published but whose secret is still hidden
pub struct CommittedRound {
    id: RoundId,
    purpose: RoundPurpose,
    range: u64,
    key: SecretKey,
    value: u64,
    commitment: Commitment,
    contribution: Option<u64>,
}

impl CommittedRound {
    /// Commit to a uniform value in `0..purpose.range()`.
    ///
    /// Draws the 32-byte key first, then the value.
    pub fn commit<E: EntropySource>(
        rng: &mut SecureRandom<E>,
        purpose: RoundPurpose,
    ) -> Result<Self> {
        let range = purpose.range();
        let key = rng.secret_key()?;
        let value = rng.uniform_int(range)?;
        let commitment = Commitment::new(&key, value);
        let id = RoundId::new();
        debug!(round = %id, ?purpose, range, %commitment, "round committed");

        Ok(Self {
            id,
            purpose,
            range,
            key,
            value,
            commitment,
            contribution: None,
        })
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn purpose(&self) -> RoundPurpose {
        self.purpose
    }

    pub fn range(&self) -> u64 {
        self.range
    }

    /// The published digest
    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    /// Everything the peer may see before contributing
    pub fn announcement(&self) -> CommitAnnouncement {
        CommitAnnouncement {
            round_id: self.id,
            purpose: self.purpose,
            range: self.range,
            commitment: self.commitment,
        }
    }

    /// The accepted contribution, if any
    pub fn contribution(&self) -> Option<u64> {
        self.contribution
    }

    /// Accept the peer's contribution and return the combined result.
    ///
    /// An out-of-range contribution leaves the round untouched so the caller
    /// can ask again against the same digest.
    pub fn contribute(&mut self, contribution: u64) -> Result<u64> {
        if self.contribution.is_some() {
            return Err(GameError::ProtocolMisuse("contribution already accepted"));
        }
        if contribution >= self.range {
            debug!(round = %self.id, contribution, range = self.range, "contribution rejected");
            return Err(GameError::OutOfRange {
                value: contribution,
                range: self.range,
            });
        }

        self.contribution = Some(contribution);
        debug!(round = %self.id, contribution, "contribution accepted");
        combine(self.value, contribution, self.range)
    }

    /// Disclose the key and value. Only allowed once a contribution is in.
    pub fn reveal(self) -> Result<RevealedRound> {
        let contribution = self
            .contribution
            .ok_or(GameError::ProtocolMisuse("reveal before contribution"))?;
        let result = combine(self.value, contribution, self.range)?;
        debug!(round = %self.id, value = self.value, result, "round revealed");

        Ok(RevealedRound {
            id: self.id,
            purpose: self.purpose,
            range: self.range,
            commitment: self.commitment,
            key: self.key,
            value: self.value,
            contribution,
            result,
        })
    }
}

impl fmt::Debug for CommittedRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommittedRound")
            .field("id", &self.id)
            .field("purpose", &self.purpose)
            .field("range", &self.range)
            .field("commitment", &self.commitment)
            .field("contribution", &self.contribution)
            .finish_non_exhaustive()
    }
}

/// A finished round with its secret disclosed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedRound {
    pub id: RoundId,
    pub purpose: RoundPurpose,
    pub range: u64,
    pub commitment: Commitment,
    pub key: SecretKey,
    pub value: u64,
    pub contribution: u64,
    pub result: u64,
}

impl RevealedRound {
    /// Audit the round: the digest opens to the value, and the numbers add up
    pub fn verify(&self) -> bool {
        self.range == self.purpose.range()
            && self.value < self.range
            && self.contribution < self.range
            && self.commitment.verify(&self.key, self.value)
            && combine(self.value, self.contribution, self.range).ok() == Some(self.result)
    }
}
