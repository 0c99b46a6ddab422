//! Pairwise win probabilities between dice.

use super::dice::{Die, FACES};
use serde::Serialize;

/// Face pairings between two dice
pub const OUTCOMES: u32 = (FACES * FACES) as u32;

/// How many of the 36 face pairings `a` wins outright against `b`
pub fn win_count(a: &Die, b: &Die) -> u32 {
    let mut wins = 0;
    for face_a in a.faces() {
        for face_b in b.faces() {
            if face_a > face_b {
                wins += 1;
            }
        }
    }
    wins
}

/// Square table: entry (row, col) is the chance that the row die beats
/// the column die. The diagonal is 0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProbabilityMatrix {
    size: usize,
    wins: Vec<u32>,
}

impl ProbabilityMatrix {
    /// Brute force over every ordered pair of distinct dice
    pub fn compute(dice: &[Die]) -> Self {
        let size = dice.len();
        let mut wins = vec![0; size * size];
        for (i, a) in dice.iter().enumerate() {
            for (j, b) in dice.iter().enumerate() {
                if i != j {
                    wins[i * size + j] = win_count(a, b);
                }
            }
        }
        Self { size, wins }
    }

    /// Number of dice
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Winning pairings of `row` against `col`, out of [`OUTCOMES`]
    pub fn wins(&self, row: usize, col: usize) -> Option<u32> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(self.wins[row * self.size + col])
    }

    /// Probability that `row` beats `col`
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.wins(row, col).map(|w| w as f64 / OUTCOMES as f64)
    }

    /// Probability that `row` and `col` roll the same value
    pub fn tie(&self, row: usize, col: usize) -> Option<f64> {
        if row == col {
            return None;
        }
        let ties = OUTCOMES - self.wins(row, col)? - self.wins(col, row)?;
        Some(ties as f64 / OUTCOMES as f64)
    }

    /// The candidate most likely to beat `against`; lowest index on ties
    pub fn best_response(&self, against: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .filter(|&i| i != against)
            .filter_map(|i| self.wins(i, against).map(|w| (i, w)))
            .min_by_key(|&(i, w)| (std::cmp::Reverse(w), i))
            .map(|(i, _)| i)
    }
}

/// Win probabilities for every ordered pair of `dice`
pub fn pairwise_win_probabilities(dice: &[Die]) -> ProbabilityMatrix {
    ProbabilityMatrix::compute(dice)
}
