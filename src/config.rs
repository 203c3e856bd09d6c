//! Configuration management with validation and defaults
//!
//! Values come from built-in defaults, an optional TOML file and environment
//! overrides, in that order. Command line flags are applied by the binary.

use crate::errors::{ConfigurationError, RouletteResult};
use crate::games::wheel::WHEEL_ORDER;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Longest spin animation, ten laps of the wheel
pub const MAX_SPIN_HOPS: usize = 10 * WHEEL_ORDER.len();

/// Complete game configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub table: TableConfig,
    pub display: DisplayConfig,
    pub rng: RngConfig,
}

/// Table and bankroll settings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    /// Opening balance in pennies
    pub starting_balance: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_balance: 10_000, // £100.00
        }
    }
}

/// Terminal presentation settings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
    pub spin_delay_ms: u64,
    pub min_hops: usize,
    pub max_hops: usize,
    /// Column width used to centre tables
    pub width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            spin_delay_ms: 120,
            min_hops: 14,
            max_hops: 21,
            width: 80,
        }
    }
}

/// Random source settings
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RngConfig {
    /// Fixed seed for reproducible sessions; entropy when absent
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Faster spin animation
    pub fn fast() -> Self {
        Self {
            display: DisplayConfig {
                spin_delay_ms: 10,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Validate configuration for logical consistency
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.table.starting_balance == 0 {
            return Err(ConfigurationError::ValidationFailed(
                "starting_balance must be > 0".to_string(),
            ));
        }

        if self.display.min_hops > self.display.max_hops {
            return Err(ConfigurationError::ValidationFailed(format!(
                "min_hops ({}) must not exceed max_hops ({})",
                self.display.min_hops, self.display.max_hops
            )));
        }

        if self.display.max_hops > MAX_SPIN_HOPS {
            return Err(ConfigurationError::ValidationFailed(format!(
                "max_hops ({}) must not exceed {}",
                self.display.max_hops, MAX_SPIN_HOPS
            )));
        }

        if self.display.width < 40 {
            return Err(ConfigurationError::ValidationFailed(
                "width must be at least 40 columns".to_string(),
            ));
        }

        Ok(())
    }

    pub fn spin_delay(&self) -> Duration {
        Duration::from_millis(self.display.spin_delay_ms)
    }
}

/// Configuration loader with environment variable support
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> RouletteResult<GameConfig> {
        let mut config = if let Some(ref path) = self.config_path {
            self.load_from_file(path)?
        } else {
            GameConfig::default()
        };

        apply_env_overrides(&mut config, |key| env::var(key).ok())?;

        config.validate()?;

        Ok(config)
    }

    fn load_from_file(&self, path: &str) -> RouletteResult<GameConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path, e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e)).into())
    }
}

/// Apply `ROULETTE_*` and `NO_COLOR` overrides read through `lookup`
pub fn apply_env_overrides<F>(config: &mut GameConfig, lookup: F) -> Result<(), ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(seed) = lookup("ROULETTE_SEED") {
        config.rng.seed = Some(parse_field("ROULETTE_SEED", &seed, "Invalid seed")?);
    }
    if let Some(balance) = lookup("ROULETTE_STARTING_BALANCE") {
        config.table.starting_balance =
            parse_field("ROULETTE_STARTING_BALANCE", &balance, "Invalid balance in pennies")?;
    }
    if let Some(delay) = lookup("ROULETTE_SPIN_DELAY_MS") {
        config.display.spin_delay_ms =
            parse_field("ROULETTE_SPIN_DELAY_MS", &delay, "Invalid delay in milliseconds")?;
    }
    if lookup("NO_COLOR").map_or(false, |v| !v.is_empty()) {
        config.display.color = false;
    }
    Ok(())
}

fn parse_field<T: std::str::FromStr>(field: &str, value: &str, reason: &str) -> Result<T, ConfigurationError> {
    value.trim().parse().map_err(|_| ConfigurationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    })
}
