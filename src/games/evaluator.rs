//! Bet evaluation
//!
//! Every evaluator returns the *net* multiplier for its category: winnings
//! credited are `stake * multiplier`, the stake itself having already been
//! taken from the balance. Zero loses every outside bet.

use crate::games::types::{
    BetKind, BetType, Column, ColorChoice, Dozen, Half, Parity,
};
use crate::games::wheel::{Color, Outcome};

/// Net multiplier for `kind` against a drawn outcome.
pub fn evaluate(kind: &BetKind, outcome: Outcome) -> u64 {
    let number = outcome.number();
    let color = outcome.color();
    match kind {
        BetKind::Number(choice) => evaluate_number(*choice, number, color),
        BetKind::Color(choice) => evaluate_color(*choice, number, color),
        BetKind::OddEven(choice) => evaluate_odd_even(*choice, number, color),
        BetKind::LowHigh(choice) => evaluate_low_high(*choice, number, color),
        BetKind::Dozen(choice) => evaluate_dozen(*choice, number, color),
        BetKind::Column(choice) => evaluate_column(*choice, number, color),
    }
}

pub fn evaluate_number(choice: u8, number: u8, _color: Color) -> u64 {
    if choice == number {
        BetType::Number.payout()
    } else {
        0
    }
}

pub fn evaluate_color(choice: ColorChoice, _number: u8, color: Color) -> u64 {
    let hit = match choice {
        ColorChoice::Red => color == Color::Red,
        ColorChoice::Black => color == Color::Black,
    };
    if hit {
        BetType::Color.payout()
    } else {
        0
    }
}

pub fn evaluate_odd_even(choice: Parity, number: u8, _color: Color) -> u64 {
    if number == 0 {
        return 0;
    }
    let hit = match choice {
        Parity::Odd => number % 2 == 1,
        Parity::Even => number % 2 == 0,
    };
    if hit {
        BetType::OddEven.payout()
    } else {
        0
    }
}

pub fn evaluate_low_high(choice: Half, number: u8, _color: Color) -> u64 {
    if number == 0 {
        return 0;
    }
    let hit = match choice {
        Half::Low => (1..=18).contains(&number),
        Half::High => (19..=36).contains(&number),
    };
    if hit {
        BetType::LowHigh.payout()
    } else {
        0
    }
}

pub fn evaluate_dozen(choice: Dozen, number: u8, _color: Color) -> u64 {
    if number == 0 {
        return 0;
    }
    let (low, high) = choice.range();
    if (low..=high).contains(&number) {
        BetType::Dozen.payout()
    } else {
        0
    }
}

pub fn evaluate_column(choice: Column, number: u8, _color: Color) -> u64 {
    if number == 0 {
        return 0;
    }
    // col1 = 1,4,7...; col2 = 2,5,8...; col3 = 3,6,9...
    let column = (number - 1) % 3 + 1;
    if column == choice.index() {
        BetType::Column.payout()
    } else {
        0
    }
}
