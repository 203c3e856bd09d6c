//! Terminal presentation
//!
//! The only place pennies become text. Everything here builds strings so it
//! can be tested without a terminal; the session writes them out.

use crate::errors::GameError;
use crate::games::wheel::{color_of, Color, Outcome, WHEEL_ORDER, wheel_position};
use crate::games::{Bet, BetResult, SettlementResult};
use crossterm::style::{self as term, Stylize};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, Write};
use std::time::Duration;

/// Format pennies as pounds, e.g. `£12.50`
pub fn format_money(pennies: u64) -> String {
    format!("£{}.{:02}", pennies / 100, pennies % 100)
}

/// Format a signed amount with an explicit sign, e.g. `+£1.00`
pub fn format_signed_money(pennies: i128) -> String {
    let sign = if pennies < 0 { '-' } else { '+' };
    let magnitude = pennies.unsigned_abs();
    format!("{}£{}.{:02}", sign, magnitude / 100, magnitude % 100)
}

/// Parse a pound amount such as `2`, `2.5` or `£2.50` into pennies.
///
/// At most two decimal places; no signs, no exponents.
pub fn parse_money(text: &str) -> Result<u64, GameError> {
    let trimmed = text.trim();
    let invalid = || GameError::InvalidStake(format!("'{}' is not an amount", trimmed));

    let amount = trimmed.strip_prefix('£').unwrap_or(trimmed);
    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) || fraction.len() > 2 {
        return Err(invalid());
    }

    let pounds: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let pence: u64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
        _ => fraction.parse().map_err(|_| invalid())?,
    };

    pounds
        .checked_mul(100)
        .and_then(|p| p.checked_add(pence))
        .ok_or_else(invalid)
}

/// Terminal colouring, switched off for `--no-color` / `NO_COLOR`
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if !self.enabled {
            return text.to_string();
        }
        term::style(text).with(terminal_color(color)).to_string()
    }

    pub fn dim(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        term::style(text).dim().to_string()
    }
}

fn terminal_color(color: Color) -> term::Color {
    match color {
        Color::Red => term::Color::Red,
        // plain black disappears on dark themes
        Color::Black => term::Color::DarkGrey,
        Color::Green => term::Color::Green,
    }
}

/// Roughly centre `line` within `width` columns
pub fn center_line(line: &str, width: usize) -> String {
    let len = line.chars().count();
    if len >= width {
        return line.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), line)
}

/// The betting layout: zero box, three columns of twelve rows, payout legend
pub fn render_layout(palette: &Palette) -> String {
    let cell = |n: u8| {
        let color = color_of(n).unwrap_or(Color::Green);
        palette.paint(&format!("{:2}", n), color)
    };
    let sep = "     ";
    let border = "+-----------------+";

    let mut out = String::new();
    out.push('\n');
    out.push_str("    Roulette Table\n");
    out.push_str(" (Col1   Col2   Col3)\n");
    out.push_str("        +----+\n");
    out.push_str(&format!("        | {} |\n", palette.paint(" 0", Color::Green)));
    out.push_str("        +----+\n");
    out.push_str(&format!(" {}\n", border));
    for row in 1..=12u8 {
        let (c1, c2, c3) = (3 * row - 2, 3 * row - 1, 3 * row);
        out.push_str(&format!(" | {}{}{}{}{}|\n", cell(c1), sep, cell(c2), sep, cell(c3)));
    }
    out.push_str(&format!(" {}\n", border));
    out.push_str(" types of play & payouts:\n");
    out.push_str(" ----------------------------------------------\n");
    out.push_str(" Col1 / Col2 / Col3 ................. 2:1\n");
    out.push_str(" 1-12 / 13-24 / 25-36 (dozens) ...... 2:1\n");
    out.push_str(" Low(1-18) / High(19-36) ............ 1:1\n");
    out.push_str(" Odd / Even ......................... 1:1\n");
    out.push_str(" Red / Black ........................ 1:1\n");
    out.push_str(" Straight (single number) ........... 35:1\n");
    out.push('\n');
    out
}

/// Centred summary of the bets placed this round
pub fn render_bets_table(bets: &[Bet], width: usize) -> String {
    if bets.is_empty() {
        return String::new();
    }
    let rule = "--------------------------------";
    let mut lines = vec![
        String::new(),
        center_line("Your bets this round:", width),
        center_line(rule, width),
        center_line(&format!("{:<10} {:<8} {:>8}", "Type", "Choice", "Stake"), width),
        center_line(rule, width),
    ];
    let mut total = 0u64;
    for bet in bets {
        lines.push(center_line(
            &format!(
                "{:<10} {:<8} {:>8}",
                bet.bet_type().as_str(),
                bet.choice_label(),
                format_money(bet.stake())
            ),
            width,
        ));
        total = total.saturating_add(bet.stake());
    }
    lines.push(center_line(rule, width));
    lines.push(center_line(&format!("Total stake: {}", format_money(total)), width));
    lines.push(String::new());
    lines.join("\n") + "\n"
}

/// Result line, e.g. `🎡 Result: 17 (black)`
pub fn render_outcome(outcome: Outcome, palette: &Palette) -> String {
    format!("🎡 Result: {}", palette.paint(&outcome.to_string(), outcome.color()))
}

/// Per-bet settlement line, winners marked
pub fn render_bet_line(result: &BetResult) -> String {
    format!(
        "Bet: {:<10} {:<8} Stake: {}  ->  Net x{}  = {}{}",
        result.bet.bet_type().as_str(),
        result.bet.choice_label(),
        format_money(result.bet.stake()),
        result.multiplier,
        format_money(result.payout),
        if result.won() { "  WIN" } else { "" }
    )
}

/// Round summary line
pub fn render_summary(result: &SettlementResult) -> String {
    format!(
        "Summary: Staked {} | Won {} | Net {} | New balance {}",
        format_money(result.total_stake),
        format_money(result.total_winnings),
        format_signed_money(result.net()),
        format_money(result.new_balance)
    )
}

/// Walks the wheel pocket by pocket until it stops on the drawn number
pub struct SpinAnimator {
    delay: Duration,
    min_hops: usize,
    max_hops: usize,
    rng: StdRng,
}

impl SpinAnimator {
    pub fn new(delay: Duration, min_hops: usize, max_hops: usize, rng: StdRng) -> Self {
        Self {
            delay,
            min_hops,
            max_hops: max_hops.max(min_hops),
            rng,
        }
    }

    pub fn seeded(delay: Duration, min_hops: usize, max_hops: usize, seed: u64) -> Self {
        Self::new(delay, min_hops, max_hops, StdRng::seed_from_u64(seed))
    }

    /// Pockets visited, ending on `outcome`
    pub fn path(&mut self, outcome: Outcome) -> Vec<u8> {
        let len = WHEEL_ORDER.len();
        let index = wheel_position(outcome.number()).unwrap_or(0);
        let hops = self.rng.gen_range(self.min_hops..=self.max_hops);
        let start = (index + len - hops % len) % len;
        (0..=hops).map(|step| WHEEL_ORDER[(start + step) % len]).collect()
    }

    pub fn animate<W: Write>(&mut self, out: &mut W, palette: &Palette, outcome: Outcome) -> io::Result<()> {
        let path = self.path(outcome);
        writeln!(out, "Spinning the wheel...")?;
        let last = path.len() - 1;
        for (step, &pocket) in path.iter().enumerate() {
            let color = color_of(pocket).unwrap_or(Color::Green);
            let frame = format!("[{:2} {:>5}]", pocket, color.to_string());
            if step == last {
                write!(out, "{}", palette.paint(&frame, color))?;
            } else {
                write!(out, "{} → ", palette.dim(&frame))?;
            }
            out.flush()?;
            if !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
        }
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ScriptedSpins;
    use crate::games::settle;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0), "£0.00");
        assert_eq!(format_money(5), "£0.05");
        assert_eq!(format_money(10_000), "£100.00");
        assert_eq!(format_money(27_050), "£270.50");
        assert_eq!(format_signed_money(-1000), "-£10.00");
        assert_eq!(format_signed_money(250), "+£2.50");
        assert_eq!(format_signed_money(0), "+£0.00");
    }

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("2").unwrap(), 200);
        assert_eq!(parse_money("2.5").unwrap(), 250);
        assert_eq!(parse_money(" 2.50 ").unwrap(), 250);
        assert_eq!(parse_money("£0.01").unwrap(), 1);
        assert_eq!(parse_money(".75").unwrap(), 75);
        assert_eq!(parse_money("10.").unwrap(), 1000);
    }

    #[test]
    fn test_parse_money_rejects_garbage() {
        for input in ["", ".", "-1", "+1", "2.505", "1e3", "abc", "1,000", "£"] {
            assert!(parse_money(input).is_err(), "{:?} should be rejected", input);
        }
    }

    #[test]
    fn test_palette_disabled_is_plain() {
        let palette = Palette::new(false);
        assert_eq!(palette.paint("17", Color::Black), "17");
        assert_eq!(palette.dim("x"), "x");

        let palette = Palette::new(true);
        assert_eq!(palette.paint("3", Color::Red), "3".red().to_string());
        assert_eq!(palette.paint("4", Color::Black), "4".dark_grey().to_string());
        assert_eq!(palette.paint("0", Color::Green), "0".green().to_string());
        assert_eq!(palette.dim("x"), "x".dim().to_string());
    }

    #[test]
    fn test_layout_lists_every_number() {
        let layout = render_layout(&Palette::new(false));
        assert!(layout.contains("|  1      2      3|"));
        assert!(layout.contains("| 34     35     36|"));
        assert!(layout.contains("35:1"));
    }

    #[test]
    fn test_bets_table_totals() {
        let bets = vec![
            Bet::collect("color", "red", 1000).unwrap(),
            Bet::collect("dozen", "2nd", 2000).unwrap(),
        ];
        let table = render_bets_table(&bets, 80);
        assert!(table.contains("Total stake: £30.00"));
        assert!(table.contains("dozen"));
        assert!(render_bets_table(&[], 80).is_empty());
    }

    #[test]
    fn test_summary_line() {
        let bets = vec![Bet::collect("number", "17", 500).unwrap()];
        let mut spins = ScriptedSpins::new(vec![17]).unwrap();
        let result = settle(10_000, &bets, &mut spins).unwrap();

        assert_eq!(
            render_summary(&result),
            "Summary: Staked £5.00 | Won £175.00 | Net +£170.00 | New balance £270.00"
        );
        assert_eq!(
            render_bet_line(&result.per_bet[0]),
            "Bet: number     17       Stake: £5.00  ->  Net x35  = £175.00  WIN"
        );
    }

    #[test]
    fn test_losing_bet_line_is_unmarked() {
        let bets = vec![Bet::collect("color", "red", 500).unwrap()];
        let mut spins = ScriptedSpins::new(vec![0]).unwrap();
        let result = settle(10_000, &bets, &mut spins).unwrap();

        assert!(render_bet_line(&result.per_bet[0]).ends_with("Net x0  = £0.00"));
    }

    #[test]
    fn test_signed_money_beyond_i64() {
        let net = i128::from(1u64 << 58) * 34;
        assert_eq!(format_signed_money(net), "+£97998327891581992.96");
        assert_eq!(format_signed_money(-net), "-£97998327891581992.96");
    }

    #[test]
    fn test_spin_path_ends_on_outcome() {
        let mut animator = SpinAnimator::seeded(Duration::ZERO, 14, 21, 9);
        for number in 0..=36 {
            let outcome = Outcome::new(number).unwrap();
            let path = animator.path(outcome);
            assert_eq!(*path.last().unwrap(), number);
            assert!((15..=22).contains(&path.len()));
        }
    }

    #[test]
    fn test_spin_path_longer_than_a_lap() {
        let mut animator = SpinAnimator::seeded(Duration::ZERO, 100, 100, 3);
        let path = animator.path(Outcome::new(26).unwrap());
        assert_eq!(path.len(), 101);
        assert_eq!(*path.last().unwrap(), 26);
    }

    #[test]
    fn test_animate_writes_frames() {
        let mut animator = SpinAnimator::seeded(Duration::ZERO, 3, 3, 1);
        let mut out = Vec::new();
        animator
            .animate(&mut out, &Palette::new(false), Outcome::new(0).unwrap())
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Spinning the wheel..."));
        assert!(text.trim_end().ends_with("[ 0 green]"));
        assert_eq!(text.matches(" → ").count(), 3);
    }
}
