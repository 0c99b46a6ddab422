//! Game rules: dice pool, selection order, throws.

use super::dice::Die;
use super::probability::ProbabilityMatrix;
use crate::error::{GameError, Result};
use crate::protocol::Player;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fewest dice a game can be played with
pub const MIN_DICE: usize = 3;

/// How a throw's face is picked
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThrowMode {
    /// The fair round's result is the face index
    #[default]
    Fair,
    /// The fair round is still played, but the face comes from [`Die::draw`]
    Simulated,
}

/// A game over a fixed pool of dice
#[derive(Clone, Debug)]
pub struct Game {
    dice: Vec<Die>,
    throw_mode: ThrowMode,
}

impl Game {
    pub fn new(dice: Vec<Die>) -> Result<Self> {
        if dice.len() < MIN_DICE {
            return Err(GameError::NotEnoughDice {
                required: MIN_DICE,
                found: dice.len(),
            });
        }
        Ok(Self {
            dice,
            throw_mode: ThrowMode::default(),
        })
    }

    pub fn with_throw_mode(mut self, throw_mode: ThrowMode) -> Self {
        self.throw_mode = throw_mode;
        self
    }

    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    pub fn die(&self, index: usize) -> Option<&Die> {
        self.dice.get(index)
    }

    pub fn throw_mode(&self) -> ThrowMode {
        self.throw_mode
    }

    /// Win probabilities for the whole pool, computed fresh
    pub fn probabilities(&self) -> ProbabilityMatrix {
        ProbabilityMatrix::compute(&self.dice)
    }

    /// A fresh selection with every die available
    pub fn selection(&self) -> DiceSelection {
        DiceSelection::new(self.dice.len())
    }

    /// Value thrown with die `index`, given the combined result of a throw round
    pub fn throw<R: Rng + ?Sized>(&self, index: usize, fair_result: u64, rng: &mut R) -> Result<i64> {
        let die = self.die(index).ok_or(GameError::DieUnavailable(index))?;
        let value = match self.throw_mode {
            ThrowMode::Fair => usize::try_from(fair_result)
                .ok()
                .and_then(|face| die.face(face))
                .ok_or(GameError::OutOfRange {
                    value: fair_result,
                    range: super::dice::FACES as u64,
                })?,
            ThrowMode::Simulated => die.draw(rng),
        };
        debug!(die = index, fair_result, value, mode = ?self.throw_mode, "throw");
        Ok(value)
    }
}

/// Which die each side holds. A die taken by one side is gone for the other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiceSelection {
    available: Vec<usize>,
    user: Option<usize>,
    computer: Option<usize>,
}

impl DiceSelection {
    fn new(count: usize) -> Self {
        Self {
            available: (0..count).collect(),
            user: None,
            computer: None,
        }
    }

    /// Indices still in the pool, ascending
    pub fn available(&self) -> &[usize] {
        &self.available
    }

    pub fn choice(&self, player: Player) -> Option<usize> {
        match player {
            Player::User => self.user,
            Player::Computer => self.computer,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.user.is_some() && self.computer.is_some()
    }

    /// Take die `index` for the user
    pub fn choose_for_user(&mut self, index: usize) -> Result<()> {
        if self.user.is_some() {
            return Err(GameError::ProtocolMisuse("user already holds a die"));
        }
        self.take(index)?;
        self.user = Some(index);
        debug!(die = index, "user selected die");
        Ok(())
    }

    /// Pick for the computer: the strongest counter to the user's die when the
    /// user went first, otherwise any available die at random.
    pub fn choose_for_computer<R: Rng + ?Sized>(
        &mut self,
        probabilities: &ProbabilityMatrix,
        rng: &mut R,
    ) -> Result<usize> {
        if self.computer.is_some() {
            return Err(GameError::ProtocolMisuse("computer already holds a die"));
        }

        let index = match self.user {
            Some(user) => probabilities.best_response(user, &self.available),
            None => self.available.choose(rng).copied(),
        }
        .ok_or(GameError::ProtocolMisuse("no dice left to select"))?;

        self.take(index)?;
        self.computer = Some(index);
        debug!(die = index, "computer selected die");
        Ok(index)
    }

    fn take(&mut self, index: usize) -> Result<()> {
        let pos = self
            .available
            .iter()
            .position(|&i| i == index)
            .ok_or(GameError::DieUnavailable(index))?;
        self.available.remove(pos);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cycle_game() -> Game {
        Game::new(vec![
            Die::new(&[2, 2, 4, 4, 9, 9]).unwrap(),
            Die::new(&[1, 1, 6, 6, 8, 8]).unwrap(),
            Die::new(&[3, 3, 5, 5, 7, 7]).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_needs_three_dice() {
        let two = vec![
            Die::new(&[1, 2, 3, 4, 5, 6]).unwrap(),
            Die::new(&[1, 2, 3, 4, 5, 6]).unwrap(),
        ];
        assert!(matches!(
            Game::new(two),
            Err(GameError::NotEnoughDice { required: 3, found: 2 })
        ));
    }

    #[test]
    fn test_user_choice_removes_die() {
        let game = cycle_game();
        let mut selection = game.selection();
        selection.choose_for_user(1).unwrap();

        assert_eq!(selection.available(), &[0, 2]);
        assert_eq!(selection.choice(Player::User), Some(1));
        assert!(!selection.is_complete());
    }

    #[test]
    fn test_taken_or_missing_die_is_recoverable() {
        let game = cycle_game();
        let mut rng = StdRng::seed_from_u64(1);
        let mut selection = game.selection();
        let taken = selection
            .choose_for_computer(&game.probabilities(), &mut rng)
            .unwrap();

        let err = selection.choose_for_user(taken).unwrap_err();
        assert!(matches!(err, GameError::DieUnavailable(_)));
        assert!(err.is_recoverable());
        assert!(matches!(
            selection.choose_for_user(9),
            Err(GameError::DieUnavailable(9))
        ));
        assert_eq!(selection.choice(Player::User), None);
    }

    #[test]
    fn test_computer_counters_user_die() {
        let game = cycle_game();
        let probabilities = game.probabilities();
        let mut rng = StdRng::seed_from_u64(1);

        for (user, counter) in [(0, 2), (1, 0), (2, 1)] {
            let mut selection = game.selection();
            selection.choose_for_user(user).unwrap();
            let picked = selection
                .choose_for_computer(&probabilities, &mut rng)
                .unwrap();
            assert_eq!(picked, counter);
            assert!(selection.is_complete());
        }
    }

    #[test]
    fn test_computer_first_picks_available_die() {
        let game = cycle_game();
        let probabilities = game.probabilities();
        let mut rng = StdRng::seed_from_u64(99);
        let mut seen = [false; 3];
        for _ in 0..60 {
            let mut selection = game.selection();
            let picked = selection
                .choose_for_computer(&probabilities, &mut rng)
                .unwrap();
            assert!(!selection.available().contains(&picked));
            seen[picked] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_choosing_twice_is_misuse() {
        let game = cycle_game();
        let mut selection = game.selection();
        selection.choose_for_user(0).unwrap();
        assert!(matches!(
            selection.choose_for_user(1),
            Err(GameError::ProtocolMisuse(_))
        ));
    }

    #[test]
    fn test_fair_throw_uses_result_as_face_index() {
        let game = cycle_game();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(game.throw(0, 4, &mut rng).unwrap(), 9);
        assert_eq!(game.throw(1, 0, &mut rng).unwrap(), 1);
        assert!(matches!(
            game.throw(0, 6, &mut rng),
            Err(GameError::OutOfRange { value: 6, range: 6 })
        ));
        assert!(matches!(
            game.throw(5, 0, &mut rng),
            Err(GameError::DieUnavailable(5))
        ));
    }

    #[test]
    fn test_fair_throw_rejects_wide_results() {
        // Results that would wrap to a valid index on a narrow usize
        let game = cycle_game();
        let mut rng = StdRng::seed_from_u64(0);
        for result in [(1u64 << 32) + 1, u64::MAX] {
            assert!(matches!(
                game.throw(0, result, &mut rng),
                Err(GameError::OutOfRange { value, range: 6 }) if value == result
            ));
        }
    }

    #[test]
    fn test_simulated_throw_lands_on_a_face() {
        let game = cycle_game().with_throw_mode(ThrowMode::Simulated);
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..50 {
            let value = game.throw(2, 0, &mut rng).unwrap();
            assert!(game.dice()[2].faces().contains(&value));
        }
    }
}
