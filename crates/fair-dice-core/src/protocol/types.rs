//! Protocol types.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of one commit-reveal round
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(Uuid);

impl RoundId {
    /// Create a new random round ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RoundId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoundId({})", self.0)
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a round decides, and therefore its range
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPurpose {
    /// Who selects a die first
    MoveOrder,
    /// Which face a throw lands on
    Throw,
}

impl RoundPurpose {
    pub fn range(&self) -> u64 {
        match self {
            RoundPurpose::MoveOrder => 2,
            RoundPurpose::Throw => 6,
        }
    }
}

/// Player identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    User,
    Computer,
}

impl Player {
    /// Who moves first, from a combined move-order result.
    ///
    /// 0 hands the first move to the user, anything else to the computer.
    pub fn first_mover(result: u64) -> Player {
        if result == 0 {
            Player::User
        } else {
            Player::Computer
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::User => write!(f, "user"),
            Player::Computer => write!(f, "computer"),
        }
    }
}

/// Game outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    UserWins,
    ComputerWins,
    Tie,
}

impl Outcome {
    /// Higher throw wins
    pub fn from_throws(user: i64, computer: i64) -> Self {
        match user.cmp(&computer) {
            std::cmp::Ordering::Greater => Outcome::UserWins,
            std::cmp::Ordering::Less => Outcome::ComputerWins,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::UserWins => Some(Player::User),
            Outcome::ComputerWins => Some(Player::Computer),
            Outcome::Tie => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::UserWins => "user wins",
            Outcome::ComputerWins => "computer wins",
            Outcome::Tie => "tie",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
