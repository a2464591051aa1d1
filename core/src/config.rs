use crate::errors::WidgetResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default backend address of the assistant web application
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Configuration for the assistant client
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WidgetConfig {
    pub base_url: Option<String>,
    pub history_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub save_history: Option<bool>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            history_dir: None,
            log_level: None,
            save_history: Some(true),
        }
    }
}

impl WidgetConfig {
    /// Loads configuration from a file if it exists, otherwise returns the default config
    pub fn load_from_file(path: &Path) -> WidgetResult<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                crate::errors::WidgetError::ConfigError(format!(
                    "Failed to read config file: {}",
                    e
                ))
            })?;

            let config: Self = toml::from_str(&content).map_err(|e| {
                crate::errors::WidgetError::ConfigError(format!(
                    "Failed to parse config file: {}",
                    e
                ))
            })?;

            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from the default location, falling back to
    /// defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        match get_default_config_file() {
            Ok(path) => Self::load_from_file(&path).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to a file
    pub fn save_to_file(&self, path: &Path) -> WidgetResult<()> {
        let content = toml::to_string(self).map_err(|e| {
            crate::errors::WidgetError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        // Ensure the directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                crate::errors::WidgetError::ConfigError(format!(
                    "Failed to create config directory: {}",
                    e
                ))
            })?;
        }

        fs::write(path, content).map_err(|e| {
            crate::errors::WidgetError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Merges this config with another config, preferring values from the other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            base_url: other.base_url.clone().or_else(|| self.base_url.clone()),
            history_dir: other
                .history_dir
                .clone()
                .or_else(|| self.history_dir.clone()),
            log_level: other.log_level.clone().or_else(|| self.log_level.clone()),
            save_history: other.save_history.or(self.save_history),
        }
    }

    /// Effective backend base URL, without a trailing slash
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// Directory holding the persisted chat and calculator history
    pub fn history_dir(&self) -> WidgetResult<PathBuf> {
        match &self.history_dir {
            Some(dir) => Ok(dir.clone()),
            None => get_default_config_dir(),
        }
    }
}

/// Helper function to get the default config directory
pub fn get_default_config_dir() -> WidgetResult<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        crate::errors::WidgetError::ConfigError("Could not determine home directory".to_string())
    })?;

    Ok(home_dir.join(".config").join("funland-chat"))
}

/// Helper function to get the default config file path
pub fn get_default_config_file() -> WidgetResult<PathBuf> {
    let config_dir = get_default_config_dir()?;
    Ok(config_dir.join("config.toml"))
}
