//! Error types for the roulette table
//!
//! Game rule violations are local and recoverable: the session re-prompts or
//! rejects the round. Configuration and I/O failures end the process.

use std::fmt;

/// Root error type for all roulette operations
#[derive(Debug)]
pub enum RouletteError {
    /// Bet construction or settlement errors
    Game(GameError),

    /// Configuration related errors
    Configuration(ConfigurationError),

    /// Terminal input/output errors
    Io(std::io::Error),
}

/// Bet validation and round settlement errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Unknown bet type: {0}")]
    UnknownBetType(String),

    #[error("Invalid choice '{choice}' for {bet_type} bet")]
    InvalidChoice { bet_type: String, choice: String },

    #[error("Invalid stake: {0}")]
    InvalidStake(String),

    #[error("Insufficient funds: stake {required} exceeds available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("Round has no bets")]
    EmptyRound,

    #[error("Number {0} is not on the wheel")]
    NumberOutOfRange(u8),

    #[error("Scripted spin sequence is empty")]
    EmptyScript,

    #[error("Arithmetic overflow while settling")]
    ArithmeticOverflow,
}

/// Configuration loading and validation errors
#[derive(Debug)]
pub enum ConfigurationError {
    ValidationFailed(String),
    InvalidValue { field: String, value: String, reason: String },
    LoadFailed(String),
}

impl fmt::Display for RouletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouletteError::Game(e) => write!(f, "Game error: {}", e),
            RouletteError::Configuration(e) => write!(f, "Configuration error: {}", e),
            RouletteError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::ValidationFailed(msg) => write!(f, "Validation failed: {}", msg),
            ConfigurationError::InvalidValue { field, value, reason } => {
                write!(f, "Invalid value for {}: '{}' ({})", field, value, reason)
            }
            ConfigurationError::LoadFailed(msg) => write!(f, "Failed to load configuration: {}", msg),
        }
    }
}

impl std::error::Error for RouletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouletteError::Game(e) => Some(e),
            RouletteError::Configuration(e) => Some(e),
            RouletteError::Io(e) => Some(e),
        }
    }
}

impl std::error::Error for ConfigurationError {}

impl From<GameError> for RouletteError {
    fn from(e: GameError) -> Self {
        RouletteError::Game(e)
    }
}

impl From<ConfigurationError> for RouletteError {
    fn from(e: ConfigurationError) -> Self {
        RouletteError::Configuration(e)
    }
}

impl From<std::io::Error> for RouletteError {
    fn from(e: std::io::Error) -> Self {
        RouletteError::Io(e)
    }
}

impl From<toml::de::Error> for RouletteError {
    fn from(e: toml::de::Error) -> Self {
        RouletteError::Configuration(ConfigurationError::LoadFailed(e.to_string()))
    }
}

// Convenience type alias for Results
pub type RouletteResult<T> = Result<T, RouletteError>;
