//! Application configuration
//!
//! Stored as TOML in `~/.config/padwatch/config.toml`. A missing file is
//! created with defaults on first start; missing keys fall back to their
//! defaults so older files keep loading.

use crate::controller::backend::DEFAULT_LIBRARY_CANDIDATES;
use crate::controller::{Button, Combination, SessionSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

const CONFIG_DIR: &str = ".config/padwatch";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub polling: PollingConfig,
    pub viewer: ViewerConfig,
    pub combinations: Vec<Combination>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            polling: PollingConfig::default(),
            viewer: ViewerConfig::default(),
            combinations: vec![Combination::new("menu", vec![Button::Start, Button::Back])],
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PollingConfig {
    /// Delay between two polls of all slots
    pub tick_interval_ms: u64,
    /// Input libraries to try, newest first
    pub library_candidates: Vec<String>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16,
            library_candidates: DEFAULT_LIBRARY_CANDIDATES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl PollingConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            library_candidates: self.library_candidates.clone(),
        }
    }
}

/// Window and gamepad widget geometry
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub indicator_size: f32,
    pub stroke_width: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Gamepad Controller".to_string(),
            width: 500.0,
            height: 500.0,
            canvas_width: 180.0,
            canvas_height: 80.0,
            indicator_size: 10.0,
            stroke_width: 2.0,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, self.to_toml_string()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path`, writing the defaults there first if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::load_from(path);
        }

        info!("No config at {}, writing defaults", path.display());
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }
}

/// Default location of the config file
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let mut path = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    path.push(CONFIG_DIR);
    path.push(CONFIG_FILE);
    Ok(path)
}
