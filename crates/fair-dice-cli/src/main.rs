//! Fair Dice
//!
//! Console game of non-transitive dice where every random decision can be
//! audited after the fact.

mod config;
mod console;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Cli, Commands, PlayArgs, VerifyArgs};
use console::{Console, Session};
use fair_dice_core::crypto::{verify_hex, SecureRandom};
use fair_dice_core::games::Game;
use std::io;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    // Logs go to stderr so they never mix with the game on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play(args),
        Commands::Verify(args) => verify(args),
    }
}

fn play(args: PlayArgs) -> Result<ExitCode> {
    let game = Game::new(args.dice)
        .context("usage: fair-dice play 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7")?
        .with_throw_mode(args.throw_mode.into());
    info!(dice = game.dice().len(), mode = ?game.throw_mode(), "starting game");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock()).with_audit_json(args.audit_json);

    match console.play(&game, &mut SecureRandom::os(), &mut rand::thread_rng())? {
        Session::Finished(outcome) => info!(%outcome, "session over"),
        Session::Quit => info!("session abandoned"),
    }
    Ok(ExitCode::SUCCESS)
}

fn verify(args: VerifyArgs) -> Result<ExitCode> {
    if verify_hex(&args.key, args.value, &args.hmac)? {
        println!("OK: HMAC matches value {} under the given key.", args.value);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("MISMATCH: HMAC does not match value {} under the given key.", args.value);
        Ok(ExitCode::FAILURE)
    }
}
