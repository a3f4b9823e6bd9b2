use std::fmt;

use serde::{Deserialize, Serialize};

/// Configuration for the engine, provided by the game and optionally
/// overridden by the host with a JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum ticks run for one host frame (default: 10).
    pub max_steps_per_frame: u32,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Seed for the game's random source.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            max_instances: 512,
            max_sounds: 32,
            max_events: 32,
            seed: 42,
        }
    }
}

/// Why a configuration document was rejected.
#[derive(Debug)]
pub enum ConfigError {
    /// Not valid JSON, or a field has the wrong type.
    Parse(serde_json::Error),
    /// Well-formed but unusable values.
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl GameConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return Err(ConfigError::Invalid("fixed_dt must be a positive number"));
        }
        if self.max_steps_per_frame == 0 {
            return Err(ConfigError::Invalid("max_steps_per_frame must be at least 1"));
        }
        if self.max_instances == 0 || self.max_sounds == 0 || self.max_events == 0 {
            return Err(ConfigError::Invalid("buffer capacities must be non-zero"));
        }
        Ok(())
    }
}
