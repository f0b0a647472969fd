use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_API_URL: &str = "http://localhost:3001";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// YAML config file structure. Every key is optional; missing keys fall
/// back to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigYaml {
    /// Base location of the remote materials collection
    pub api_url: Option<String>,
    /// Shared secret that unlocks admin mode
    pub admin_password: Option<String>,
}

/// Application configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub admin_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

/// Location of the YAML config file: `IOR_CONFIG_PATH`, else `~/.ior/config.yaml`.
pub fn config_path() -> PathBuf {
    if let Some(path) = non_empty_env("IOR_CONFIG_PATH") {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ior")
        .join("config.yaml")
}

impl Config {
    /// Load configuration.
    ///
    /// Dev mode (`IOR_DEV_MODE` set, or a `.env` file that dotenvy can load)
    /// skips the config file. In both modes `IOR_API_URL` and
    /// `IOR_ADMIN_PASSWORD` override whatever was loaded.
    pub fn load() -> Result<Self, ConfigError> {
        let dev_mode = std::env::var("IOR_DEV_MODE").is_ok() || dotenvy::dotenv().is_ok();
        let config = if dev_mode {
            info!("Dev mode activated - loading from environment");
            Self::default()
        } else {
            let path = config_path();
            info!("Loading config from {}", path.display());
            Self::from_config_file(&path)?
        };

        Ok(config.with_overrides(
            non_empty_env("IOR_API_URL"),
            non_empty_env("IOR_ADMIN_PASSWORD"),
        ))
    }

    /// Read a YAML config file. A missing file is not an error.
    pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let yaml: ConfigYaml = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Serialization(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_yaml(yaml))
    }

    fn from_yaml(yaml: ConfigYaml) -> Self {
        let defaults = Self::default();
        Self {
            api_url: yaml.api_url.unwrap_or(defaults.api_url),
            admin_password: yaml.admin_password.unwrap_or(defaults.admin_password),
        }
    }

    /// Replace values with the given overrides where present.
    pub fn with_overrides(mut self, api_url: Option<String>, admin_password: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(password) = admin_password {
            self.admin_password = password;
        }
        self
    }
}
