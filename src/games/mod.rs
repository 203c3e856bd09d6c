pub mod types;
pub mod wheel;
pub mod rng;
pub mod evaluator;
pub mod settlement;

pub use types::*;
pub use wheel::{color_of, draw, wheel_position, Color, Outcome, RED_NUMBERS, WHEEL_ORDER};
pub use rng::{RandomSpins, ScriptedSpins, SpinSource};
pub use evaluator::evaluate;
pub use settlement::{settle, BetResult, Round, SettlementResult};
