//! Rules configuration.
//!
//! The defaults reproduce the relaxed rules the engine has always played by:
//! pseudo-legal moves, with the next move blocked while a promotion waits
//! for its piece choice. Both can be changed from a TOML file:
//!
//! ```toml
//! legality = "strict"
//! promotion_gating = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from loading a [`RulesConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rules config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse rules config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Which moves the executor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Legality {
    /// Any move the piece geometry allows, even one leaving the own king attacked.
    #[default]
    PseudoLegal,
    /// Moves that leave the own king attacked are refused, and castling
    /// out of, through or into check is not offered.
    Strict,
}

/// Knobs for the move executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub legality: Legality,
    /// Refuse moves while a promotion is waiting to be resolved.
    pub promotion_gating: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            legality: Legality::PseudoLegal,
            promotion_gating: true,
        }
    }
}

impl RulesConfig {
    /// Strict legality, promotion gating on.
    pub fn strict() -> Self {
        RulesConfig {
            legality: Legality::Strict,
            ..Self::default()
        }
    }

    /// Parses a config from TOML text; missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), ?config, "loaded rules config");
        Ok(config)
    }
}
