//! Configuration loading and typed config structures for the agent city.
//!
//! The configuration lives in `universe-config.yaml` at the project root.
//! Every section is optional; missing fields take the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};
use universe_city::CityLimits;
use universe_types::GridSize;

use crate::policy::BehaviorPolicy;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// The offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level city configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityConfig {
    /// HTTP listener.
    #[serde(default)]
    pub server: ServerSettings,

    /// Tick timing, grid, and seeding.
    #[serde(default)]
    pub simulation: SimulationSettings,

    /// Behavior probabilities, boosts, and quotas.
    #[serde(default)]
    pub policy: BehaviorPolicy,

    /// Store capacity limits.
    #[serde(default)]
    pub limits: CityLimits,

    /// Push channel settings.
    #[serde(default)]
    pub broadcast: BroadcastSettings,
}

impl CityConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `PORT` environment variable overrides `server.port`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides and validate.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.server.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.server.apply_env_overrides();
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.grid_width <= 0 || self.simulation.grid_height <= 0 {
            return Err(ConfigError::Invalid {
                field: "simulation.grid",
                reason: String::from("grid dimensions must be positive"),
            });
        }
        if self.simulation.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "simulation.tick_interval_ms",
                reason: String::from("must be at least 1"),
            });
        }
        if self.broadcast.channel_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "broadcast.channel_capacity",
                reason: String::from("must be at least 1"),
            });
        }
        Ok(())
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSettings {
    /// Override the port with `PORT` when it is set and numeric.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PORT")
            && let Ok(port) = val.parse()
        {
            self.port = port;
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Tick timing and world layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Grid columns.
    #[serde(default = "default_grid_side")]
    pub grid_width: i32,

    /// Grid rows.
    #[serde(default = "default_grid_side")]
    pub grid_height: i32,

    /// Fixed RNG seed; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Load the four founding agents and their buildings at startup.
    #[serde(default = "default_true")]
    pub seed_city: bool,
}

impl SimulationSettings {
    /// Grid dimensions.
    pub const fn grid(&self) -> GridSize {
        GridSize {
            width: self.grid_width,
            height: self.grid_height,
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            grid_width: default_grid_side(),
            grid_height: default_grid_side(),
            seed: None,
            seed_city: true,
        }
    }
}

/// Push channel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastSettings {
    /// Buffered messages per subscriber before it lags.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Activities included in each `city_update`.
    #[serde(default = "default_recent_activities")]
    pub recent_activities: usize,
}

impl Default for BroadcastSettings {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
            recent_activities: default_recent_activities(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    5000
}

const fn default_tick_interval_ms() -> u64 {
    3000
}

const fn default_grid_side() -> i32 {
    12
}

const fn default_true() -> bool {
    true
}

const fn default_channel_capacity() -> usize {
    256
}

const fn default_recent_activities() -> usize {
    5
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CityConfig::default();
        assert_eq!(config.simulation.tick_interval_ms, 3000);
        assert_eq!(config.simulation.grid(), GridSize::default());
        assert_eq!(config.limits.memory_capacity, 10);
        assert_eq!(config.limits.activity_capacity, 1000);
        assert_eq!(config.broadcast.channel_capacity, 256);
        assert!(config.simulation.seed_city);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_yaml() {
        let yaml = r"
simulation:
  tick_interval_ms: 500
  seed: 7
policy:
  build:
    scientist_chance: 0.5
    quotas:
      music_player: 4
  roles:
    move_chance: 1.0
";
        let config = CityConfig::parse(yaml).unwrap();
        assert_eq!(config.simulation.tick_interval_ms, 500);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.grid_width, 12);
        assert!((config.policy.build.scientist_chance - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.policy.build.quotas.music_player, 4);
        assert_eq!(config.policy.build.quotas.farm, 2);
        assert!((config.policy.roles.move_chance - 1.0).abs() < f64::EPSILON);
        assert!((config.policy.jobs.seek_chance - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_yaml_uses_defaults() {
        let config: CityConfig = serde_yml::from_str("{}").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.broadcast.recent_activities, 5);
    }

    #[test]
    fn zero_grid_is_rejected() {
        let yaml = "simulation:\n  grid_width: 0\n";
        let err = CityConfig::parse(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "simulation.grid", .. }));
    }

    #[test]
    fn invalid_yaml_returns_error() {
        let result = CityConfig::parse("simulation: [not, a, map]");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }
}
