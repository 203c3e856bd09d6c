//! Interactive session loop
//!
//! Owns the balance across rounds, prompts for bets and hands each completed
//! round to the settlement engine. Input and output are generic so whole
//! sessions can be driven from a script.

use crate::config::GameConfig;
use crate::display::{
    format_money, parse_money, render_bet_line, render_bets_table, render_layout,
    render_outcome, render_summary, Palette, SpinAnimator,
};
use crate::errors::{RouletteError, RouletteResult};
use crate::games::{Bet, BetType, Round, SettlementResult, SpinSource};
use crate::games::wheel::MAX_NUMBER;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};

/// One player at the table
pub struct Session<R: BufRead, W: Write> {
    input: R,
    output: W,
    spins: Box<dyn SpinSource>,
    animator: SpinAnimator,
    palette: Palette,
    width: usize,
    balance: u64,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: &GameConfig, input: R, output: W, spins: Box<dyn SpinSource>) -> Self {
        // The animation gets its own generator so cosmetic hops never shift the draws.
        let animation_rng = match config.rng.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        let animator = SpinAnimator::new(
            config.spin_delay(),
            config.display.min_hops,
            config.display.max_hops,
            animation_rng,
        );

        Self {
            input,
            output,
            spins,
            animator,
            palette: Palette::new(config.display.color),
            width: config.display.width,
            balance: config.table.starting_balance,
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Consume the session, returning the output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Play rounds until the player quits, input ends or funds run out.
    /// Returns the final balance.
    pub fn run(&mut self) -> RouletteResult<u64> {
        let mut bust = self.balance == 0;
        while !bust {
            writeln!(self.output, "Current balance: {}", format_money(self.balance))?;
            self.prompt("Type '1' to play roulette or anything else to quit: ")?;
            let answer = match self.read_line() {
                Ok(line) => line,
                Err(e) if is_end_of_input(&e) => {
                    writeln!(self.output)?;
                    break;
                }
                Err(e) => return Err(e),
            };

            if answer != "1" {
                writeln!(self.output, "OK bye bye")?;
                break;
            }

            match self.play_round() {
                Ok(result) => bust = result.is_bust(),
                Err(RouletteError::Game(e)) => {
                    log::warn!("Round rejected: {}", e);
                    writeln!(self.output, "Round rejected ({}). Balance unchanged.", e)?;
                }
                Err(e) if is_end_of_input(&e) => {
                    writeln!(self.output, "\nInput closed, round abandoned.")?;
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        if bust {
            writeln!(self.output, "Game Over - you're out of funds")?;
        }

        log::info!("Session finished with balance {}", self.balance);
        Ok(self.balance)
    }

    /// Collect bets, spin, settle and report one round
    pub fn play_round(&mut self) -> RouletteResult<SettlementResult> {
        write!(self.output, "{}", render_layout(&self.palette))?;

        let mut round = Round::new(self.balance);
        loop {
            let bet = self.collect_bet(round.remaining())?;
            round.place(bet)?;

            if round.remaining() == 0 {
                writeln!(self.output, "You've used all available funds for this round.")?;
                break;
            }
            if !self.read_yes_no("Add another bet? (y/n): ")? {
                break;
            }
        }

        write!(self.output, "{}", render_bets_table(round.bets(), self.width))?;

        let result = round.settle(self.spins.as_mut())?;

        self.animator.animate(&mut self.output, &self.palette, result.outcome)?;
        writeln!(self.output, "\n{}", render_outcome(result.outcome, &self.palette))?;
        for bet_result in &result.per_bet {
            writeln!(self.output, "{}", render_bet_line(bet_result))?;
        }
        writeln!(self.output, "\n{}\n", render_summary(&result))?;

        log::info!(
            "Round settled on {}: net {} over {} bet(s)",
            result.outcome,
            result.net(),
            result.per_bet.len()
        );
        self.balance = result.new_balance;
        Ok(result)
    }

    fn collect_bet(&mut self, remaining: u64) -> RouletteResult<Bet> {
        let type_names: Vec<String> = BetType::ALL.iter().map(|t| t.as_str().to_string()).collect();
        let bet_type: BetType = self
            .read_one_of(
                "Choose bet type (number/color/odd_even/low_high/dozen/column): ",
                &type_names,
            )?
            .parse()?;

        let choice = match bet_type {
            BetType::Number => self
                .read_number_in_range("Pick a number (0-36): ", 0, MAX_NUMBER)?
                .to_string(),
            BetType::Color => self.read_one_of("Pick a color (red/black): ", &bet_type.valid_choices())?,
            BetType::OddEven => self.read_one_of("Pick (odd/even): ", &bet_type.valid_choices())?,
            BetType::LowHigh => self.read_one_of("Pick (low/high): ", &bet_type.valid_choices())?,
            BetType::Dozen => self.read_one_of("Pick dozen (1st/2nd/3rd): ", &bet_type.valid_choices())?,
            BetType::Column => {
                self.read_one_of("Pick column (col1/col2/col3): ", &bet_type.valid_choices())?
            }
        };

        let stake = self.read_stake(remaining)?;
        Ok(Bet::collect(bet_type.as_str(), &choice, stake)?)
    }

    fn read_one_of(&mut self, prompt: &str, choices: &[String]) -> RouletteResult<String> {
        loop {
            self.prompt(prompt)?;
            let answer = self.read_line()?.to_ascii_lowercase();
            if choices.iter().any(|c| *c == answer) {
                return Ok(answer);
            }
            log::debug!("Rejected choice {:?}", answer);
            writeln!(self.output, "invalid input please input: {}", choices.join("/"))?;
        }
    }

    fn read_number_in_range(&mut self, prompt: &str, min: u8, max: u8) -> RouletteResult<u8> {
        loop {
            self.prompt(prompt)?;
            let answer = self.read_line()?;
            match answer.parse::<u8>() {
                Ok(n) if (min..=max).contains(&n) => return Ok(n),
                _ => {
                    log::debug!("Rejected number {:?}", answer);
                    writeln!(self.output, "invalid input")?;
                }
            }
        }
    }

    fn read_yes_no(&mut self, prompt: &str) -> RouletteResult<bool> {
        loop {
            self.prompt(prompt)?;
            match self.read_line()?.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please enter y/n.")?,
            }
        }
    }

    /// Stake in pounds, bounded by the funds left this round
    fn read_stake(&mut self, remaining: u64) -> RouletteResult<u64> {
        loop {
            let prompt = format!("Stake £ (available {}): ", format_money(remaining));
            self.prompt(&prompt)?;
            let answer = self.read_line()?;
            match parse_money(&answer) {
                Ok(pennies) if pennies > 0 && pennies <= remaining => return Ok(pennies),
                Ok(pennies) => log::debug!("Stake {} outside 1..={}", pennies, remaining),
                Err(e) => log::debug!("{}", e),
            }
            writeln!(self.output, "Invalid amount. Must be > 0 and ≤ available.")?;
        }
    }

    fn prompt(&mut self, text: &str) -> RouletteResult<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Next trimmed line; bytes that are not UTF-8 become U+FFFD and fail validation like any typo
    fn read_line(&mut self) -> RouletteResult<String> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(String::from_utf8_lossy(&line).trim().to_string())
    }
}

fn is_end_of_input(error: &RouletteError) -> bool {
    matches!(error, RouletteError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ScriptedSpins;
    use std::io::Cursor;

    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.display.color = false;
        config.display.spin_delay_ms = 0;
        config.rng.seed = Some(1);
        config
    }

    fn session(script: &str, pockets: Vec<u8>) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        session_with(&quiet_config(), script.as_bytes(), pockets)
    }

    fn session_with(config: &GameConfig, script: &[u8], pockets: Vec<u8>) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(
            config,
            Cursor::new(script.to_vec()),
            Vec::new(),
            Box::new(ScriptedSpins::new(pockets).unwrap()),
        )
    }

    #[test]
    fn test_quit_immediately() {
        let mut s = session("q\n", vec![0]);
        assert_eq!(s.run().unwrap(), 10_000);
        let out = String::from_utf8(s.into_output()).unwrap();
        assert!(out.contains("Current balance: £100.00"));
        assert!(out.contains("OK bye bye"));
    }

    #[test]
    fn test_single_winning_round() {
        let mut s = session("1\nnumber\n17\n5\nn\nq\n", vec![17]);
        assert_eq!(s.run().unwrap(), 27_000);
        let out = String::from_utf8(s.into_output()).unwrap();
        assert!(out.contains("Net x35  = £175.00"));
        assert!(out.contains("New balance £270.00"));
    }

    #[test]
    fn test_invalid_input_is_reprompted() {
        let script = "1\nsplit\ncolor\ngreen\nred\n0\n200\n2.505\n2.50\nmaybe\nn\nq\n";
        let mut s = session(script, vec![1]);
        // even money pays the stake back as winnings only
        assert_eq!(s.run().unwrap(), 10_000);
        let out = String::from_utf8(s.into_output()).unwrap();
        assert_eq!(out.matches("invalid input please input").count(), 2);
        assert_eq!(out.matches("Invalid amount").count(), 3);
        assert!(out.contains("Please enter y/n."));
    }

    #[test]
    fn test_all_in_stops_collecting() {
        let mut s = session("1\ncolor\nblack\n100\n", vec![0]);
        assert_eq!(s.run().unwrap(), 0);
        let out = String::from_utf8(s.into_output()).unwrap();
        assert!(out.contains("You've used all available funds for this round."));
        assert!(out.contains("Game Over - you're out of funds"));
    }

    #[test]
    fn test_non_utf8_input_is_reprompted() {
        let mut s = session_with(&quiet_config(), b"1\ncolor\n\xff\nred\n1\nn\nq\n", vec![1]);
        assert_eq!(s.run().unwrap(), 10_000);
        assert_eq!(s.balance(), 10_000);
        let out = String::from_utf8(s.into_output()).unwrap();
        assert!(out.contains("invalid input please input: red/black"));
        assert!(out.contains("Result: 1 (red)"));
        assert!(out.contains("OK bye bye"));
    }

    #[test]
    fn test_overflowing_round_is_rejected_not_fatal() {
        let mut config = quiet_config();
        config.table.starting_balance = u64::MAX;
        // £10^17 on a straight number pays more than a u64 can hold
        let mut s = session_with(&config, b"1\nnumber\n17\n100000000000000000\nn\nq\n", vec![17]);

        assert_eq!(s.run().unwrap(), u64::MAX);
        assert_eq!(s.balance(), u64::MAX);
        let out = String::from_utf8(s.into_output()).unwrap();
        assert!(out.contains("Round rejected (Arithmetic overflow while settling). Balance unchanged."));
        assert!(out.contains("OK bye bye"));
    }

    #[test]
    fn test_empty_bankroll_is_game_over() {
        let mut config = quiet_config();
        config.table.starting_balance = 0;
        let mut s = session_with(&config, b"", vec![0]);
        assert_eq!(s.run().unwrap(), 0);
        let out = String::from_utf8(s.into_output()).unwrap();
        assert_eq!(out, "Game Over - you're out of funds\n");
    }

    #[test]
    fn test_end_of_input_mid_round_keeps_balance() {
        let mut s = session("1\ndozen\n", vec![5]);
        assert_eq!(s.run().unwrap(), 10_000);
        let out = String::from_utf8(s.into_output()).unwrap();
        assert!(out.contains("round abandoned"));
    }
}
