//! European wheel layout and colour classification.

use crate::errors::GameError;
use crate::games::rng::SpinSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest pocket on a single-zero wheel.
pub const MAX_NUMBER: u8 = 36;

/// Number of pockets, zero included.
pub const POCKET_COUNT: u8 = MAX_NUMBER + 1;

/// Red numbers on a European wheel.
pub const RED_NUMBERS: [u8; 18] = [1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36];

/// Clockwise pocket order starting at zero.
pub const WHEEL_ORDER: [u8; 37] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5,
    24, 16, 33, 1, 20, 14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

/// Pocket colour
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
    Green,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
            Color::Green => write!(f, "green"),
        }
    }
}

/// Colour of a pocket. Fails for anything off the wheel.
pub fn color_of(number: u8) -> Result<Color, GameError> {
    if number > MAX_NUMBER {
        return Err(GameError::NumberOutOfRange(number));
    }
    Ok(classify(number))
}

// Callers guarantee `number <= MAX_NUMBER`.
fn classify(number: u8) -> Color {
    if number == 0 {
        Color::Green
    } else if RED_NUMBERS.contains(&number) {
        Color::Red
    } else {
        Color::Black
    }
}

/// Index of `number` in [`WHEEL_ORDER`].
pub fn wheel_position(number: u8) -> Option<usize> {
    WHEEL_ORDER.iter().position(|&n| n == number)
}

/// The single drawn result of a spin
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outcome {
    number: u8,
}

impl Outcome {
    pub fn new(number: u8) -> Result<Self, GameError> {
        if number > MAX_NUMBER {
            return Err(GameError::NumberOutOfRange(number));
        }
        Ok(Self { number })
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn color(&self) -> Color {
        classify(self.number)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number, self.color())
    }
}

/// Draw one outcome from the injected source.
pub fn draw(source: &mut dyn SpinSource) -> Result<Outcome, GameError> {
    let pocket = source.next_pocket();
    log::debug!("Wheel landed on pocket {}", pocket);
    Outcome::new(pocket)
}
