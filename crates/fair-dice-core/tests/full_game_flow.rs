//! Integration tests for the full game flow.
//!
//! These tests play complete sessions from the move-order round to the
//! final comparison of throws.

use fair_dice_core::{
    crypto::{verify_hex, ScriptedEntropy, SecureRandom},
    games::{Die, Game, ThrowMode},
    protocol::{CommittedRound, Outcome, Player, RevealedRound, RoundPurpose},
    GameError,
};
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

/// Queue one round's worth of entropy: a key, then the committed value
fn script_round(source: &mut ScriptedEntropy, key_byte: u8, value: u64) {
    source.push_bytes(&[key_byte; 32]).push_value(value);
}

/// Run one round to completion and check its reveal
fn play_round(
    rng: &mut SecureRandom<&mut ScriptedEntropy>,
    purpose: RoundPurpose,
    contribution: u64,
) -> RevealedRound {
    let mut round = CommittedRound::commit(rng, purpose).unwrap();
    let announcement = round.announcement();
    assert_eq!(announcement.purpose, purpose);
    let published = announcement.commitment.to_string();

    round.contribute(contribution).unwrap();
    let revealed = round.reveal().unwrap();

    assert_eq!(revealed.purpose, purpose);
    assert!(revealed.verify());
    assert!(verify_hex(&revealed.key.to_hex(), revealed.value, &published).unwrap());
    revealed
}

/// Computer wins the move order and picks first; the user counters
#[test]
fn test_full_game_computer_moves_first() {
    let game = cycle_game();
    let mut source = ScriptedEntropy::new();
    script_round(&mut source, 0x11, 1); // move order
    script_round(&mut source, 0x22, 4); // user's throw
    script_round(&mut source, 0x33, 2); // computer's throw
    let mut secure = SecureRandom::new(&mut source);
    let mut rng = StdRng::seed_from_u64(5);

    // Phase 1: move order, (1 + 0) mod 2 = 1
    let order = play_round(&mut secure, RoundPurpose::MoveOrder, 0);
    assert_eq!(order.result, 1);
    assert_eq!(Player::first_mover(order.result), Player::Computer);

    // Phase 2: dice selection
    let probabilities = game.probabilities();
    let mut selection = game.selection();
    let computer_die = selection
        .choose_for_computer(&probabilities, &mut rng)
        .unwrap();
    let user_die = probabilities
        .best_response(computer_die, selection.available())
        .unwrap();
    selection.choose_for_user(user_die).unwrap();
    assert!(selection.is_complete());
    assert!(probabilities.get(user_die, computer_die).unwrap() > 0.5);

    // Phase 3: throws
    let user_round = play_round(&mut secure, RoundPurpose::Throw, 3);
    assert_eq!(user_round.result, 1); // (4 + 3) mod 6
    let user_throw = game.throw(user_die, user_round.result, &mut rng).unwrap();
    assert_eq!(user_throw, game.dice()[user_die].faces()[1]);

    let computer_round = play_round(&mut secure, RoundPurpose::Throw, 5);
    assert_eq!(computer_round.result, 1); // (2 + 5) mod 6
    let computer_throw = game
        .throw(computer_die, computer_round.result, &mut rng)
        .unwrap();
    assert_eq!(computer_throw, game.dice()[computer_die].faces()[1]);

    match Outcome::from_throws(user_throw, computer_throw) {
        Outcome::UserWins => assert!(user_throw > computer_throw),
        Outcome::ComputerWins => assert!(user_throw < computer_throw),
        Outcome::Tie => assert_eq!(user_throw, computer_throw),
    }
    assert_eq!(source.remaining(), 0);
}

/// User wins the move order, computer counters with the best die
#[test]
fn test_full_game_user_moves_first() {
    let game = cycle_game();
    let mut source = ScriptedEntropy::new();
    script_round(&mut source, 0x44, 0); // move order
    script_round(&mut source, 0x55, 0); // user's throw
    script_round(&mut source, 0x66, 5); // computer's throw
    let mut secure = SecureRandom::new(&mut source);
    let mut rng = StdRng::seed_from_u64(6);

    let order = play_round(&mut secure, RoundPurpose::MoveOrder, 0);
    assert_eq!(Player::first_mover(order.result), Player::User);

    let mut selection = game.selection();
    selection.choose_for_user(0).unwrap();
    let computer_die = selection
        .choose_for_computer(&game.probabilities(), &mut rng)
        .unwrap();
    assert_eq!(computer_die, 2);

    // User: die 0, face (0 + 2) mod 6 = 2 -> 4
    let user_round = play_round(&mut secure, RoundPurpose::Throw, 2);
    let user_throw = game.throw(0, user_round.result, &mut rng).unwrap();
    assert_eq!(user_throw, 4);

    // Computer: die 2, face (5 + 0) mod 6 = 5 -> 7
    let computer_round = play_round(&mut secure, RoundPurpose::Throw, 0);
    let computer_throw = game.throw(2, computer_round.result, &mut rng).unwrap();
    assert_eq!(computer_throw, 7);

    assert_eq!(
        Outcome::from_throws(user_throw, computer_throw),
        Outcome::ComputerWins
    );
}

/// An invalid contribution is retried against the same published digest
#[test]
fn test_retry_after_out_of_range_contribution() {
    let mut source = ScriptedEntropy::new();
    script_round(&mut source, 0x77, 3);
    let mut secure = SecureRandom::new(&mut source);

    let mut round = CommittedRound::commit(&mut secure, RoundPurpose::Throw).unwrap();
    let published = round.announcement();

    for bad in [6, 7, 100] {
        let err = round.contribute(bad).unwrap_err();
        assert!(err.is_recoverable());
    }
    assert_eq!(round.contribute(3).unwrap(), 0);

    let revealed = round.reveal().unwrap();
    assert_eq!(revealed.commitment, published.commitment);
    assert_eq!(revealed.id, published.round_id);
}

/// Simulated throws still land on the chosen die's faces
#[test]
fn test_simulated_throw_mode_game() {
    let game = cycle_game().with_throw_mode(ThrowMode::Simulated);
    let mut secure = SecureRandom::os();
    let mut rng = StdRng::seed_from_u64(8);

    let mut round = CommittedRound::commit(&mut secure, RoundPurpose::Throw).unwrap();
    let result = round.contribute(0).unwrap();
    let value = game.throw(1, result, &mut rng).unwrap();

    assert!(game.dice()[1].faces().contains(&value));
    assert!(round.reveal().unwrap().verify());
}

#[test]
fn test_invalid_dice_configuration() {
    assert!(matches!(
        Die::new(&[1, 2, 3, 4, 5]),
        Err(GameError::InvalidDieSpec(5))
    ));
    let one = vec![Die::new(&[1, 2, 3, 4, 5, 6]).unwrap()];
    assert!(matches!(
        Game::new(one),
        Err(GameError::NotEnoughDice { .. })
    ));
}
