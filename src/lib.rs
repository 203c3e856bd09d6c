//! Roulette - single-zero European roulette for the terminal
//!
//! The `games` module is the settlement core: wheel layout, bet validation,
//! per-category evaluation and round settlement over integer pennies. The
//! remaining modules wrap it in configuration, terminal presentation and an
//! interactive session loop.

pub mod config;
pub mod display;
pub mod errors;
pub mod games;
pub mod session;

pub use config::{ConfigLoader, GameConfig};
pub use errors::{ConfigurationError, GameError, RouletteError, RouletteResult};
pub use games::{
    color_of, settle, Bet, BetKind, BetResult, BetType, Color, Outcome, RandomSpins, Round,
    ScriptedSpins, SettlementResult, SpinSource,
};
pub use session::Session;
