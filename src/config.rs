//! Optimizer configuration.
//!
//! Load settings from TOML to tune the search and the reward model without code changes.
//!
//! ```
//! use dichromate::config::OptimizerConfig;
//!
//! let config = OptimizerConfig::from_toml_str(r#"
//!     round_cap = 10
//!
//!     [scoring]
//!     occupancy_bonus = 1
//! "#).unwrap();
//!
//! assert_eq!(config.round_cap, 10);
//! assert_eq!(config.scoring.occupancy_bonus, 1);
//! ```
//!
//! A missing file falls back to the defaults:
//!
//! ```
//! use dichromate::config::OptimizerConfig;
//!
//! let config = OptimizerConfig::load("optimizer.toml").unwrap_or_default();
//! assert_eq!(config.round_cap, 30);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::Scoring;

/// Maximum number of local search rounds unless configured otherwise.
pub const DEFAULT_ROUND_CAP: usize = 30;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or has the wrong shape.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The settings parsed but cannot be used.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for an [`Optimizer`](crate::Optimizer).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct OptimizerConfig {
    /// Upper bound on local search rounds.
    pub round_cap: usize,

    /// The reward model used while searching.
    pub scoring: Scoring,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            round_cap: DEFAULT_ROUND_CAP,
            scoring: Scoring::default(),
        }
    }
}

impl OptimizerConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject settings the optimizer cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round_cap == 0 {
            return Err(ConfigError::Invalid("round_cap must be at least 1".to_owned()));
        }

        Ok(())
    }

    /// Builder-style override of [`Self::round_cap`].
    pub fn with_round_cap(mut self, round_cap: usize) -> Self {
        self.round_cap = round_cap;
        self
    }

    /// Builder-style override of [`Self::scoring`].
    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }
}
