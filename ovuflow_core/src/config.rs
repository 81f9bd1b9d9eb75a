//! Configuration file support for Ovuflow.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/ovuflow/config.toml`.

use crate::input::MAX_CYCLE_LENGTH;
use crate::{Error, ExerciseLevel, HealthCondition, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Defaults used when the command line leaves a value out
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_cycle_length")]
    pub cycle_length: u32,

    #[serde(default)]
    pub health_condition: HealthCondition,

    #[serde(default)]
    pub exercise_level: ExerciseLevel,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            cycle_length: default_cycle_length(),
            health_condition: HealthCondition::default(),
            exercise_level: ExerciseLevel::default(),
        }
    }
}

/// Where results are written
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_record_path")]
    pub record_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            record_path: default_record_path(),
        }
    }
}

// Default value functions
fn default_cycle_length() -> u32 {
    28
}

fn default_record_path() -> PathBuf {
    PathBuf::from("user_data.txt")
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            config_path => {
                tracing::info!(
                    "No config file found at {:?}, using defaults",
                    config_path
                );
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    ///
    /// `None` when the platform has no config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("ovuflow").join("config.toml"))
    }

    /// Check values serde cannot reject on its own
    pub fn validate(&self) -> Result<()> {
        if self.profile.cycle_length == 0 || self.profile.cycle_length > MAX_CYCLE_LENGTH {
            return Err(Error::Config(format!(
                "profile.cycle_length must be between 1 and {} days",
                MAX_CYCLE_LENGTH
            )));
        }
        Ok(())
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()
            .ok_or_else(|| Error::Config("No config directory available".into()))?;
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
