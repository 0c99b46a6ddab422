//! Interactive console game loop.

use crate::render::probability_table;
use anyhow::{anyhow, Result};
use fair_dice_core::crypto::{EntropySource, SecureRandom};
use fair_dice_core::games::{DiceSelection, Game};
use fair_dice_core::protocol::{CommittedRound, Outcome, Player, RevealedRound, RoundPurpose};
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::info;

/// How a session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Session {
    Finished(Outcome),
    Quit,
}

/// One line of user input
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Number(u64),
    Help,
    Exit,
    Invalid(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "x" | "X" => Input::Exit,
            "?" => Input::Help,
            _ => line
                .parse()
                .map(Input::Number)
                .unwrap_or_else(|_| Input::Invalid(line.to_string())),
        }
    }
}

/// Plays one game over a line-based reader and writer
pub struct Console<R, W> {
    input: R,
    output: W,
    audit_json: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            audit_json: false,
        }
    }

    /// Print each revealed round as JSON after its human-readable reveal
    pub fn with_audit_json(mut self, audit_json: bool) -> Self {
        self.audit_json = audit_json;
        self
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Move order, dice selection, then one throw each
    pub fn play<E, G>(
        &mut self,
        game: &Game,
        secure: &mut SecureRandom<E>,
        rng: &mut G,
    ) -> Result<Session>
    where
        E: EntropySource,
        G: Rng + ?Sized,
    {
        writeln!(self.output, "Let's determine who makes the first move.")?;
        let Some(order) = self.fair_round(game, secure, RoundPurpose::MoveOrder)? else {
            return self.quit();
        };

        let probabilities = game.probabilities();
        let mut selection = game.selection();
        let first = Player::first_mover(order.result);
        info!(%first, "move order decided");
        match first {
            Player::User => {
                writeln!(self.output, "You make the first move.")?;
                if !self.select_user_die(game, &mut selection)? {
                    return self.quit();
                }
                let picked = selection.choose_for_computer(&probabilities, rng)?;
                writeln!(self.output, "I choose the {} dice.", game.dice()[picked])?;
            }
            Player::Computer => {
                let picked = selection.choose_for_computer(&probabilities, rng)?;
                writeln!(
                    self.output,
                    "I make the first move and choose the {} dice.",
                    game.dice()[picked]
                )?;
                if !self.select_user_die(game, &mut selection)? {
                    return self.quit();
                }
            }
        }

        let user_die = selection
            .choice(Player::User)
            .ok_or_else(|| anyhow!("user has no die after selection"))?;
        let computer_die = selection
            .choice(Player::Computer)
            .ok_or_else(|| anyhow!("computer has no die after selection"))?;

        writeln!(self.output, "It's time for your throw.")?;
        let Some(user_throw) = self.throw(game, secure, rng, user_die, "Your")? else {
            return self.quit();
        };
        writeln!(self.output, "It's time for my throw.")?;
        let Some(computer_throw) = self.throw(game, secure, rng, computer_die, "My")? else {
            return self.quit();
        };

        let outcome = Outcome::from_throws(user_throw, computer_throw);
        match outcome.winner() {
            Some(Player::User) => {
                writeln!(self.output, "You win ({user_throw} > {computer_throw})!")?
            }
            Some(Player::Computer) => {
                writeln!(self.output, "I win ({computer_throw} > {user_throw})!")?
            }
            None => writeln!(self.output, "It's a tie ({user_throw} = {computer_throw})!")?,
        }
        info!(user_throw, computer_throw, "throws compared");
        Ok(Session::Finished(outcome))
    }

    /// Commit, take the user's number, reveal. `None` if the user left.
    fn fair_round<E: EntropySource>(
        &mut self,
        game: &Game,
        secure: &mut SecureRandom<E>,
        purpose: RoundPurpose,
    ) -> Result<Option<RevealedRound>> {
        let mut round = CommittedRound::commit(secure, purpose)?;
        let announcement = round.announcement();
        writeln!(
            self.output,
            "I selected a random value in the range 0..{} (HMAC={}).",
            announcement.max_value(),
            announcement.commitment
        )?;
        match announcement.purpose {
            RoundPurpose::MoveOrder => writeln!(self.output, "Try to guess my selection.")?,
            RoundPurpose::Throw => writeln!(
                self.output,
                "Add your number modulo {}.",
                announcement.range
            )?,
        }

        loop {
            for i in 0..announcement.range {
                writeln!(self.output, "{i} - {i}")?;
            }
            self.print_exit_help()?;

            match self.prompt()? {
                None | Some(Input::Exit) => return Ok(None),
                Some(Input::Help) => self.help(game)?,
                Some(Input::Invalid(s)) => writeln!(
                    self.output,
                    "Invalid input '{s}'. Pick a number from the list, or ? for help."
                )?,
                Some(Input::Number(n)) => match round.contribute(n) {
                    Ok(_) => break,
                    Err(e) if e.is_recoverable() => writeln!(self.output, "{e}. Try again.")?,
                    Err(e) => return Err(e.into()),
                },
            }
        }

        let revealed = round.reveal()?;
        writeln!(
            self.output,
            "My selection: {} (KEY={}).",
            revealed.value,
            revealed.key.to_hex()
        )?;
        if revealed.purpose == RoundPurpose::Throw {
            writeln!(
                self.output,
                "The fair number generation result is {} + {} = {} (mod {}).",
                revealed.value, revealed.contribution, revealed.result, revealed.range
            )?;
        }
        if self.audit_json {
            writeln!(self.output, "{}", serde_json::to_string(&revealed)?)?;
        }
        Ok(Some(revealed))
    }

    /// Ask until the user holds a die. `false` if the user left.
    fn select_user_die(&mut self, game: &Game, selection: &mut DiceSelection) -> Result<bool> {
        writeln!(self.output, "Choose your dice:")?;
        loop {
            for &i in selection.available() {
                if let Some(die) = game.die(i) {
                    writeln!(self.output, "{i} - {die}")?;
                }
            }
            self.print_exit_help()?;

            match self.prompt()? {
                None | Some(Input::Exit) => return Ok(false),
                Some(Input::Help) => self.help(game)?,
                Some(Input::Invalid(s)) => writeln!(
                    self.output,
                    "Invalid input '{s}'. Pick a dice from the list, or ? for help."
                )?,
                Some(Input::Number(n)) => {
                    let index = usize::try_from(n).unwrap_or(usize::MAX);
                    match selection.choose_for_user(index) {
                        Ok(()) => {
                            writeln!(self.output, "You choose the {} dice.", game.dice()[index])?;
                            return Ok(true);
                        }
                        Err(e) if e.is_recoverable() => {
                            writeln!(self.output, "{e}. Try again.")?
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
            }
        }
    }

    fn throw<E, G>(
        &mut self,
        game: &Game,
        secure: &mut SecureRandom<E>,
        rng: &mut G,
        die: usize,
        whose: &str,
    ) -> Result<Option<i64>>
    where
        E: EntropySource,
        G: Rng + ?Sized,
    {
        let Some(round) = self.fair_round(game, secure, RoundPurpose::Throw)? else {
            return Ok(None);
        };
        let value = game.throw(die, round.result, rng)?;
        writeln!(self.output, "{whose} throw is {value}.")?;
        Ok(Some(value))
    }

    fn help(&mut self, game: &Game) -> Result<()> {
        let table = probability_table(game.dice(), &game.probabilities());
        write!(self.output, "{table}")?;
        Ok(())
    }

    fn print_exit_help(&mut self) -> Result<()> {
        writeln!(self.output, "X - exit")?;
        writeln!(self.output, "? - help")?;
        Ok(())
    }

    /// Next line of input; `None` at end of input
    fn prompt(&mut self) -> Result<Option<Input>> {
        write!(self.output, "Your selection: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(Input::parse(&line)))
    }

    fn quit(&mut self) -> Result<Session> {
        writeln!(self.output, "Exiting game.")?;
        info!("user left the game");
        Ok(Session::Quit)
    }
}
