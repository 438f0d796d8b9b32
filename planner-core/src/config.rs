//! Global planner configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::day::DaySet;
use crate::error::{PlannerError, PlannerResult};
use crate::persistence::StorageKeys;

static DEFAULT_DATA_DIR: &str = "~/planner";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

/// Configuration at ~/.config/planner/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Directory the schedule files are stored in.
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub day_set: DaySet,

    /// Override the storage key for events. Setting the same keys for both
    /// day sets makes them share one schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slots_key: Option<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            data_dir: default_data_dir(),
            day_set: DaySet::default(),
            events_key: None,
            time_slots_key: None,
        }
    }
}

impl PlannerConfig {
    pub fn config_path() -> PlannerResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlannerError::Config("Could not determine config directory".into()))?
            .join("planner");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/planner/config.toml, creating a commented default on
    /// first run.
    pub fn load() -> PlannerResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> PlannerResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| PlannerError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlannerError::Config(e.to_string()))
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Storage keys for `day_set`, with any configured overrides applied.
    pub fn storage_keys(&self, day_set: DaySet) -> StorageKeys {
        let defaults = StorageKeys::for_day_set(day_set);

        StorageKeys {
            events: self.events_key.clone().unwrap_or(defaults.events),
            time_slots: self.time_slots_key.clone().unwrap_or(defaults.time_slots),
        }
    }

    /// Save to ~/.config/planner/config.toml
    pub fn save(&self) -> PlannerResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> PlannerResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| PlannerError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .map_err(|e| PlannerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PlannerResult<()> {
        let contents = format!(
            "\
# planner configuration

# Where the schedule is stored:
# data_dir = \"{}\"

# Columns to show, \"weekend\" or \"week\":
# day_set = \"weekend\"

# Storage keys (set both day sets to the same keys to share one schedule):
# events_key = \"plannerEvents\"
# time_slots_key = \"plannerTimeSlots\"
",
            DEFAULT_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlannerError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PlannerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
