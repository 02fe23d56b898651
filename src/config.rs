// Application configuration loaded from TOML

use crate::engine::input::InputOptions;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "ARCADE_INPUT_CONFIG";

/// Config file used when the environment does not name one
pub const DEFAULT_CONFIG_FILE: &str = "arcade-input.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Which adapter profile the binary drives the menu through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    pub profile: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            profile: "menu".to_string(),
        }
    }
}

/// One selectable menu entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    /// Deployment id used to match metadata records
    pub id: String,
    pub title: String,
    pub url: String,
}

impl CardConfig {
    pub fn new(id: &str, title: &str, url: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Deployment metadata endpoint; no fetch when unset
    pub deployments_url: Option<String>,
    pub cards: Vec<CardConfig>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            deployments_url: None,
            cards: vec![
                CardConfig::new("snake", "Snake", "https://snake.example.com"),
                CardConfig::new("pong", "Pong", "https://pong.example.com"),
                CardConfig::new("breakout", "Breakout", "https://breakout.example.com"),
            ],
        }
    }
}

/// Everything the binary reads at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub input: InputOptions,
    pub adapter: AdapterConfig,
    pub menu: MenuConfig,
}

impl AppConfig {
    /// Parse a config from TOML text
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Load a config file, falling back to defaults
    ///
    /// A missing file is normal; an unreadable or malformed one is logged.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }
}

/// Config path from the environment, or the default file name
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}
