//! Fair Dice Core Library
//!
//! Provably fair play of non-transitive dice between a user and the
//! computer. Each random decision is a commit-reveal round: the computer
//! publishes an HMAC of a secret value, the user adds a number of their own,
//! and the key is disclosed afterwards so the digest can be checked.
//!
//! - `crypto`: secure randomness with unbiased range reduction, commitments
//! - `protocol`: the commit-reveal round and its messages
//! - `games`: dice, pairwise win probabilities, selection and throw rules

pub mod crypto;
pub mod error;
pub mod games;
pub mod protocol;

pub use crypto::{Commitment, EntropySource, OsEntropy, SecretKey, SecureRandom};
pub use error::{GameError, Result};
pub use games::{Die, Game, ProbabilityMatrix, ThrowMode};
pub use protocol::{CommitAnnouncement, CommittedRound, Outcome, Player, RevealedRound, RoundPurpose};
