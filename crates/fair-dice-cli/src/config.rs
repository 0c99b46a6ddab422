//! Command line configuration.

use clap::{Args, Parser, Subcommand, ValueEnum};
use fair_dice_core::games::{Die, ThrowMode};

/// Provably fair non-transitive dice.
///
/// Every random decision is committed to with an HMAC before you pick your
/// number, and the key is shown afterwards so you can check it.
#[derive(Parser, Debug)]
#[command(name = "fair-dice", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a game with three or more dice, e.g. `play 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7`
    Play(PlayArgs),
    /// Check a revealed key and value against a published HMAC
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Dice as six comma-separated integers each
    #[arg(
        required = true,
        value_name = "DIE",
        value_parser = parse_die,
        allow_hyphen_values = true
    )]
    pub dice: Vec<Die>,

    /// How a throw's face is picked
    #[arg(long, value_enum, default_value_t = ThrowModeArg::Fair)]
    pub throw_mode: ThrowModeArg,

    /// Also print every revealed round as a line of JSON
    #[arg(long)]
    pub audit_json: bool,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Revealed key, hex
    #[arg(long)]
    pub key: String,

    /// Revealed value
    #[arg(long)]
    pub value: u64,

    /// HMAC published before the reveal, hex
    #[arg(long)]
    pub hmac: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThrowModeArg {
    /// The fair round result picks the face
    Fair,
    /// The face is drawn at random after the fair round
    Simulated,
}

impl From<ThrowModeArg> for ThrowMode {
    fn from(arg: ThrowModeArg) -> Self {
        match arg {
            ThrowModeArg::Fair => ThrowMode::Fair,
            ThrowModeArg::Simulated => ThrowMode::Simulated,
        }
    }
}

/// Parse "2,2,4,4,9,9" into a die
pub fn parse_die(s: &str) -> Result<Die, String> {
    let faces = s
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<i64>()
                .map_err(|_| format!("'{part}' is not an integer"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Die::new(&faces).map_err(|e| format!("{e} in '{s}'"))
}
