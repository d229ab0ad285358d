use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::store::DEFAULT_STORAGE_KEY;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Key the annotation blob is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,

    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
}

fn default_db_path() -> String {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("underline-reader");
    std::fs::create_dir_all(&data_dir).ok();
    data_dir.join("annotations.db").to_string_lossy().to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_highlight_color() -> String {
    "yellow".to_string()
}

fn default_wrap_width() -> usize {
    80
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            storage_key: default_storage_key(),
            highlight_color: default_highlight_color(),
            wrap_width: default_wrap_width(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.storage_key.trim().is_empty() {
            return Err(AppError::Config("storage_key must not be empty".to_string()));
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("underline-reader")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_gets_defaults() {
        let config = Config::from_toml("db_path = \"/tmp/a.db\"\nwrap_width = 60\n").unwrap();
        assert_eq!(config.db_path, "/tmp/a.db");
        assert_eq!(config.wrap_width, 60);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.highlight_color, "yellow");
    }

    #[test]
    fn test_empty_storage_key_rejected() {
        let err = Config::from_toml("storage_key = \"  \"").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_malformed_toml_is_error() {
        assert!(matches!(
            Config::from_toml("wrap_width = \"wide\""),
            Err(AppError::Toml(_))
        ));
    }
}
