use crate::errors::GameError;
use crate::games::wheel::MAX_NUMBER;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Net payout for a straight-up number
pub const STRAIGHT_PAYOUT: u64 = 35;
/// Net payout for red/black, odd/even and low/high
pub const EVEN_MONEY_PAYOUT: u64 = 1;
/// Net payout for dozens and columns
pub const TWO_TO_ONE_PAYOUT: u64 = 2;

/// Supported wager categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BetType {
    Number,
    Color,
    OddEven,
    LowHigh,
    Dozen,
    Column,
}

impl BetType {
    pub const ALL: [BetType; 6] = [
        BetType::Number,
        BetType::Color,
        BetType::OddEven,
        BetType::LowHigh,
        BetType::Dozen,
        BetType::Column,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BetType::Number => "number",
            BetType::Color => "color",
            BetType::OddEven => "odd_even",
            BetType::LowHigh => "low_high",
            BetType::Dozen => "dozen",
            BetType::Column => "column",
        }
    }

    /// Labels accepted as a choice for this category
    pub fn valid_choices(&self) -> Vec<String> {
        match self {
            BetType::Number => (0..=MAX_NUMBER).map(|n| n.to_string()).collect(),
            BetType::Color => labels(&["red", "black"]),
            BetType::OddEven => labels(&["odd", "even"]),
            BetType::LowHigh => labels(&["low", "high"]),
            BetType::Dozen => labels(&["1st", "2nd", "3rd"]),
            BetType::Column => labels(&["col1", "col2", "col3"]),
        }
    }

    /// Net multiplier paid when a bet of this category wins
    pub fn payout(&self) -> u64 {
        match self {
            BetType::Number => STRAIGHT_PAYOUT,
            BetType::Color | BetType::OddEven | BetType::LowHigh => EVEN_MONEY_PAYOUT,
            BetType::Dozen | BetType::Column => TWO_TO_ONE_PAYOUT,
        }
    }
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BetType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        BetType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| GameError::UnknownBetType(s.trim().to_string()))
    }
}

/// Red or black (green is never a wager)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Red,
    Black,
}

/// Odd or even
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Odd,
    Even,
}

/// Low (1-18) or high (19-36)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Half {
    Low,
    High,
}

/// 1-12, 13-24 or 25-36
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Dozen {
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
}

impl Dozen {
    /// Inclusive number range covered by this dozen
    pub fn range(&self) -> (u8, u8) {
        match self {
            Dozen::First => (1, 12),
            Dozen::Second => (13, 24),
            Dozen::Third => (25, 36),
        }
    }
}

/// Table column: col1 holds 1,4,7..34, col2 holds 2,5,8..35, col3 holds 3,6,9..36
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Column {
    #[serde(rename = "col1")]
    First,
    #[serde(rename = "col2")]
    Second,
    #[serde(rename = "col3")]
    Third,
}

impl Column {
    /// 1-based column index
    pub fn index(&self) -> u8 {
        match self {
            Column::First => 1,
            Column::Second => 2,
            Column::Third => 3,
        }
    }
}

macro_rules! choice_labels {
    ($ty:ident, $bet_type:expr, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $($ty::$variant => f.write_str($label),)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = GameError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($label => Ok($ty::$variant),)+
                    _ => Err(GameError::InvalidChoice {
                        bet_type: $bet_type.to_string(),
                        choice: s.trim().to_string(),
                    }),
                }
            }
        }
    };
}

choice_labels!(ColorChoice, BetType::Color, { Red => "red", Black => "black" });
choice_labels!(Parity, BetType::OddEven, { Odd => "odd", Even => "even" });
choice_labels!(Half, BetType::LowHigh, { Low => "low", High => "high" });
choice_labels!(Dozen, BetType::Dozen, { First => "1st", Second => "2nd", Third => "3rd" });
choice_labels!(Column, BetType::Column, { First => "col1", Second => "col2", Third => "col3" });

/// What a wager is placed on (closed set, one variant per category)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "choice", rename_all = "snake_case")]
pub enum BetKind {
    Number(u8),
    Color(ColorChoice),
    OddEven(Parity),
    LowHigh(Half),
    Dozen(Dozen),
    Column(Column),
}

impl BetKind {
    pub fn bet_type(&self) -> BetType {
        match self {
            BetKind::Number(_) => BetType::Number,
            BetKind::Color(_) => BetType::Color,
            BetKind::OddEven(_) => BetType::OddEven,
            BetKind::LowHigh(_) => BetType::LowHigh,
            BetKind::Dozen(_) => BetType::Dozen,
            BetKind::Column(_) => BetType::Column,
        }
    }

    /// Parse the choice label for a given category
    pub fn parse(bet_type: BetType, choice: &str) -> Result<Self, GameError> {
        match bet_type {
            BetType::Number => {
                let invalid = || GameError::InvalidChoice {
                    bet_type: bet_type.to_string(),
                    choice: choice.trim().to_string(),
                };
                let number: u8 = choice.trim().parse().map_err(|_| invalid())?;
                if number > MAX_NUMBER {
                    return Err(invalid());
                }
                Ok(BetKind::Number(number))
            }
            BetType::Color => Ok(BetKind::Color(choice.parse()?)),
            BetType::OddEven => Ok(BetKind::OddEven(choice.parse()?)),
            BetType::LowHigh => Ok(BetKind::LowHigh(choice.parse()?)),
            BetType::Dozen => Ok(BetKind::Dozen(choice.parse()?)),
            BetType::Column => Ok(BetKind::Column(choice.parse()?)),
        }
    }

    pub fn choice_label(&self) -> String {
        match self {
            BetKind::Number(n) => n.to_string(),
            BetKind::Color(c) => c.to_string(),
            BetKind::OddEven(p) => p.to_string(),
            BetKind::LowHigh(h) => h.to_string(),
            BetKind::Dozen(d) => d.to_string(),
            BetKind::Column(c) => c.to_string(),
        }
    }
}

impl fmt::Display for BetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.bet_type(), self.choice_label())
    }
}

/// One wager placed in a round. Stake is in pennies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bet {
    kind: BetKind,
    stake: u64,
}

impl Bet {
    pub fn new(kind: BetKind, stake: u64) -> Result<Self, GameError> {
        if stake == 0 {
            return Err(GameError::InvalidStake("stake must be greater than zero".to_string()));
        }
        if let BetKind::Number(n) = kind {
            if n > MAX_NUMBER {
                return Err(GameError::InvalidChoice {
                    bet_type: BetType::Number.to_string(),
                    choice: n.to_string(),
                });
            }
        }
        Ok(Self { kind, stake })
    }

    /// Build a bet from its textual type and choice labels
    pub fn collect(bet_type: &str, choice: &str, stake: u64) -> Result<Self, GameError> {
        let bet_type: BetType = bet_type.parse()?;
        let kind = BetKind::parse(bet_type, choice)?;
        Self::new(kind, stake)
    }

    pub fn kind(&self) -> BetKind {
        self.kind
    }

    pub fn stake(&self) -> u64 {
        self.stake
    }

    pub fn bet_type(&self) -> BetType {
        self.kind.bet_type()
    }

    pub fn choice_label(&self) -> String {
        self.kind.choice_label()
    }
}
