//! Protocol messages.

use crate::crypto::Commitment;
use crate::protocol::{RoundId, RoundPurpose};
use serde::{Deserialize, Serialize};

/// Public half of a round, shown to the peer before it contributes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAnnouncement {
    pub round_id: RoundId,
    pub purpose: RoundPurpose,
    pub range: u64,
    pub commitment: Commitment,
}

impl CommitAnnouncement {
    /// Largest value either side may pick
    pub fn max_value(&self) -> u64 {
        self.range - 1
    }
}
