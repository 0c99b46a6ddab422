//! Dice, win probabilities and game rules.

mod dice;
mod probability;
mod session;

pub use dice::{Die, FACES};
pub use probability::{pairwise_win_probabilities, win_count, ProbabilityMatrix, OUTCOMES};
pub use session::{DiceSelection, Game, ThrowMode, MIN_DICE};
