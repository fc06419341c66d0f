//! Configuration file support for Cafsim.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/cafsim/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub persona: PersonaConfig,
}

/// Reference data file locations
///
/// Both paths are optional; a missing path falls back to the built-in
/// catalog or an empty persona list.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct DataConfig {
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    #[serde(default)]
    pub personas_path: Option<PathBuf>,
}

/// Chart rendering parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_step_minutes")]
    pub step_minutes: i64,

    #[serde(default = "default_chart_height")]
    pub height: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            step_minutes: default_step_minutes(),
            height: default_chart_height(),
        }
    }
}

/// Persona preset selection
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PersonaConfig {
    /// Preset applied when no persona or settings flags are given
    #[serde(default)]
    pub default: Option<String>,
}

// Default value functions
fn default_step_minutes() -> i64 {
    crate::series::DEFAULT_STEP_MINUTES
}

fn default_chart_height() -> usize {
    12
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
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
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
        base.join("cafsim").join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.chart.step_minutes <= 0 {
            return Err(Error::Config(format!(
                "chart.step_minutes must be positive, got {}",
                self.chart.step_minutes
            )));
        }
        if self.chart.height == 0 {
            return Err(Error::Config("chart.height must be at least 1".into()));
        }
        Ok(())
    }
}
