//! Six-sided dice with arbitrary integer faces.

use crate::error::{GameError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of faces on every die
pub const FACES: usize = 6;

/// An immutable die
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die {
    faces: [i64; FACES],
}

impl Die {
    /// Build a die from exactly six faces
    pub fn new(faces: &[i64]) -> Result<Self> {
        let faces: [i64; FACES] = faces
            .try_into()
            .map_err(|_| GameError::InvalidDieSpec(faces.len()))?;
        Ok(Self { faces })
    }

    pub fn faces(&self) -> &[i64; FACES] {
        &self.faces
    }

    /// Face at `index`, for turning a fair throw result into a value
    pub fn face(&self, index: usize) -> Option<i64> {
        self.faces.get(index).copied()
    }

    /// One face chosen uniformly at random.
    ///
    /// Not protected by any commitment; use a fair round when the peer must
    /// be able to audit the throw.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        self.faces[rng.gen_range(0..FACES)]
    }
}

impl TryFrom<Vec<i64>> for Die {
    type Error = GameError;

    fn try_from(faces: Vec<i64>) -> Result<Self> {
        Die::new(&faces)
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.faces.iter().map(|face| face.to_string()).collect();
        write!(f, "[{}]", faces.join(","))
    }
}
