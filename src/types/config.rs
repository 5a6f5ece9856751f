//! Configuration structures for the crew simulator
//!
//! This module contains the simulation configuration structure and validation logic
//! used to control repair durations, setup delays and travel speed.

use super::SimTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default timing constants for the crew simulation
pub mod defaults {
    use crate::types::SimTime;

    /// Probability that a repair is a long one
    pub const LONG_REPAIR_PROBABILITY: f64 = 0.1;

    /// Duration of a regular repair in minutes
    pub const SHORT_REPAIR_MINUTES: SimTime = 10;

    /// Duration of a long repair in minutes
    pub const LONG_REPAIR_MINUTES: SimTime = 25;

    /// Minimum delay before a technician starts the next hotspot in the same neighborhood
    pub const MIN_SETUP_MINUTES: SimTime = 10;

    /// Maximum delay before a technician starts the next hotspot in the same neighborhood
    pub const MAX_SETUP_MINUTES: SimTime = 20;

    /// Crew travel speed between neighborhoods, in graph distance units per hour
    pub const TRAVEL_SPEED: f64 = 50.0;
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Probability that a repair is a long one (0.0-1.0)
    pub long_repair_probability: Option<f64>,

    /// Duration of a regular repair in minutes
    pub short_repair_minutes: Option<SimTime>,

    /// Duration of a long repair in minutes
    pub long_repair_minutes: Option<SimTime>,

    /// Minimum setup delay between hotspots in minutes
    pub min_setup_minutes: Option<SimTime>,

    /// Maximum setup delay between hotspots in minutes
    pub max_setup_minutes: Option<SimTime>,

    /// Travel speed in graph distance units per hour
    pub travel_speed: Option<f64>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,
}

/// Configuration for the crew simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Probability that a repair is a long one (0.0-1.0)
    pub long_repair_probability: f64,

    /// Duration of a regular repair in minutes
    pub short_repair_minutes: SimTime,

    /// Duration of a long repair in minutes
    pub long_repair_minutes: SimTime,

    /// Minimum setup delay between hotspots in minutes (inclusive)
    pub min_setup_minutes: SimTime,

    /// Maximum setup delay between hotspots in minutes (inclusive)
    pub max_setup_minutes: SimTime,

    /// Travel speed in graph distance units per hour
    pub travel_speed: f64,

    /// Random seed for reproducible results
    pub seed: Option<u64>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    /// Probability value is out of range
    #[error("Invalid probability for {field}: {value} (must be between 0.0 and 1.0)")]
    InvalidProbability {
        /// Name of the field with invalid probability
        field: String,
        /// The invalid probability value
        value: f64,
    },

    /// Repair durations are invalid
    #[error("Invalid repair durations: short ({0}) must be > 0 and <= long ({1})")]
    InvalidRepairDurations(SimTime, SimTime),

    /// Setup delay range is invalid
    #[error("Invalid setup range: min ({0}) must be <= max ({1})")]
    InvalidSetupRange(SimTime, SimTime),

    /// Travel speed is invalid
    #[error("Travel speed must be a positive finite number, got {0}")]
    InvalidTravelSpeed(f64),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            long_repair_probability: defaults::LONG_REPAIR_PROBABILITY,
            short_repair_minutes: defaults::SHORT_REPAIR_MINUTES,
            long_repair_minutes: defaults::LONG_REPAIR_MINUTES,
            min_setup_minutes: defaults::MIN_SETUP_MINUTES,
            max_setup_minutes: defaults::MAX_SETUP_MINUTES,
            travel_speed: defaults::TRAVEL_SPEED,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            long_repair_probability: config_file
                .long_repair_probability
                .unwrap_or(defaults.long_repair_probability),
            short_repair_minutes: config_file
                .short_repair_minutes
                .unwrap_or(defaults.short_repair_minutes),
            long_repair_minutes: config_file
                .long_repair_minutes
                .unwrap_or(defaults.long_repair_minutes),
            min_setup_minutes: config_file.min_setup_minutes.unwrap_or(defaults.min_setup_minutes),
            max_setup_minutes: config_file.max_setup_minutes.unwrap_or(defaults.max_setup_minutes),
            travel_speed: config_file.travel_speed.unwrap_or(defaults.travel_speed),
            seed: config_file.seed.or(defaults.seed),
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.long_repair_probability) {
            return Err(ConfigValidationError::InvalidProbability {
                field: "long_repair_probability".to_string(),
                value: self.long_repair_probability,
            });
        }

        if self.short_repair_minutes == 0 || self.short_repair_minutes > self.long_repair_minutes {
            return Err(ConfigValidationError::InvalidRepairDurations(
                self.short_repair_minutes,
                self.long_repair_minutes,
            ));
        }

        if self.min_setup_minutes > self.max_setup_minutes {
            return Err(ConfigValidationError::InvalidSetupRange(
                self.min_setup_minutes,
                self.max_setup_minutes,
            ));
        }

        if !self.travel_speed.is_finite() || self.travel_speed <= 0.0 {
            return Err(ConfigValidationError::InvalidTravelSpeed(self.travel_speed));
        }

        Ok(())
    }

    /// Get the setup delay range as a tuple
    pub fn setup_range(&self) -> (SimTime, SimTime) {
        (self.min_setup_minutes, self.max_setup_minutes)
    }

    /// Convert a graph distance into whole minutes of travel
    ///
    /// Fractional minutes are truncated toward zero.
    pub fn travel_minutes(&self, distance: f64) -> SimTime {
        (distance / self.travel_speed * 60.0) as SimTime
    }
}
