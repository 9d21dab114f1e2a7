//! themereg Configuration Module
//! Handles loading and validating themereg.config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "themereg.config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Invalid config format: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub updates: UpdatesConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub activation: ActivationDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_slug")]
    pub slug: String,
    /// Name of the option blob record; derived from the slug when absent
    #[serde(default)]
    pub option_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatesConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

/// Values written to the standalone flags on first activation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationDefaults {
    #[serde(default)]
    pub purchase_code: String,
    #[serde(default = "default_supported_until")]
    pub supported_until: String,
    #[serde(default = "default_buyer")]
    pub buyer: String,
}

fn default_slug() -> String {
    "flatsome".to_string()
}

fn default_endpoint() -> String {
    "https://updates.example.com".to_string()
}

fn default_user_agent() -> String {
    format!("themereg/{}", env!("CARGO_PKG_VERSION"))
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("data/options.db")
}

fn default_supported_until() -> String {
    "14.07.2099".to_string()
}

fn default_buyer() -> String {
    "Licensed".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            slug: default_slug(),
            option_name: None,
        }
    }
}

impl Default for UpdatesConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

impl Default for ActivationDefaults {
    fn default() -> Self {
        Self {
            purchase_code: String::new(),
            supported_until: default_supported_until(),
            buyer: default_buyer(),
        }
    }
}

impl ThemeConfig {
    pub fn option_name(&self) -> String {
        self.option_name
            .clone()
            .unwrap_or_else(|| format!("{}_registration", self.slug))
    }
}

impl Config {
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = project_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Err(ConfigError::NotFound(config_path));
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load the project config, falling back to defaults if there is none
    pub fn load_or_default(project_dir: &Path) -> Result<Self, ConfigError> {
        match Self::load(project_dir) {
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn save(&self, project_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(project_dir)?;
        let config_path = project_dir.join(CONFIG_FILE);
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Settings database path, resolved against the project directory
    pub fn storage_path(&self, project_dir: &Path) -> PathBuf {
        if self.storage.path.is_absolute() {
            self.storage.path.clone()
        } else {
            project_dir.join(&self.storage.path)
        }
    }
}
