//! Protocol types, messages and the commit-reveal round.

mod exchange;
mod messages;
mod types;

pub use exchange::{combine, CommittedRound, RevealedRound};
pub use messages::CommitAnnouncement;
pub use types::{Outcome, Player, RoundId, RoundPurpose};
