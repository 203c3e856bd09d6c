//! Whole sessions driven by scripted input and scripted spins

use roulette::{GameConfig, ScriptedSpins, Session};
use std::io::Cursor;

fn run_session(balance: u64, script: &str, pockets: &[u8]) -> (u64, String) {
    let mut config = GameConfig::fast();
    config.table.starting_balance = balance;
    config.display.color = false;
    config.display.spin_delay_ms = 0;
    config.rng.seed = Some(7);

    let mut session = Session::new(
        &config,
        Cursor::new(script.as_bytes().to_vec()),
        Vec::new(),
        Box::new(ScriptedSpins::new(pockets.to_vec()).unwrap()),
    );
    let final_balance = session.run().expect("session runs");
    let output = String::from_utf8(session.into_output()).expect("utf-8 output");
    (final_balance, output)
}

#[test]
fn test_two_bet_round_then_quit() {
    let script = "1\ncolor\nred\n10\ny\ndozen\n2nd\n20\nn\nquit\n";
    let (balance, output) = run_session(10_000, script, &[14]);

    assert_eq!(balance, 12_000);
    assert!(output.contains("Your bets this round:"));
    assert!(output.contains("Total stake: £30.00"));
    assert!(output.contains("Result: 14 (red)"));
    assert!(output.contains("Summary: Staked £30.00 | Won £50.00 | Net +£20.00 | New balance £120.00"));
    assert!(output.contains("OK bye bye"));
}

#[test]
fn test_balance_carries_across_rounds() {
    let script = "1\nnumber\n5\n1\nn\n1\nodd_even\nodd\n2\nn\nx\n";
    let (balance, output) = run_session(1000, script, &[5, 0]);

    // round one: 1000 - 100 + 3500; round two loses 200 on zero
    assert_eq!(balance, 4200);
    assert!(output.contains("Current balance: £44.00"));
    assert!(output.contains("Current balance: £42.00"));
}

#[test]
fn test_stake_capped_by_remaining_funds() {
    let script = "1\nlow_high\nlow\n3\ny\nlow_high\nhigh\n3\n2\n";
    let (balance, output) = run_session(500, script, &[20]);

    assert!(output.contains("available £2.00"));
    assert!(output.contains("Invalid amount"));
    assert!(output.contains("You've used all available funds for this round."));
    // low loses 300, high wins 200
    assert_eq!(balance, 200);
}

#[test]
fn test_bust_ends_the_game() {
    let (balance, output) = run_session(100, "1\ncolor\nred\n1\n", &[0]);

    assert_eq!(balance, 0);
    assert!(output.contains("Result: 0 (green)"));
    assert!(output.trim_end().ends_with("Game Over - you're out of funds"));
}
