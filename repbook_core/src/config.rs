//! Configuration file support for Repbook.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/repbook/config.toml`.

use crate::types::{Equipment, ExerciseKind, MuscleGroup};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub units: UnitsConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub library: LibraryConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Display unit for weights
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    pub fn label(self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
        }
    }
}

/// Unit preferences configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct UnitsConfig {
    #[serde(default)]
    pub weight: WeightUnit,
}

/// Editing defaults configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Sets created when an exercise is added without an explicit count
    #[serde(default = "default_sets_per_exercise")]
    pub sets_per_exercise: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            sets_per_exercise: default_sets_per_exercise(),
        }
    }
}

/// Custom exercise library entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomExercise {
    pub name: String,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub primary_muscle: MuscleGroup,
    #[serde(default)]
    pub secondary_muscles: Vec<MuscleGroup>,
    #[serde(default)]
    pub kind: ExerciseKind,
}

/// Exercise library configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct LibraryConfig {
    #[serde(default)]
    pub custom: Vec<CustomExercise>,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("repbook")
}

fn default_sets_per_exercise() -> usize {
    3
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
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("repbook").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
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
