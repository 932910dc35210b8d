use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Path of the sentence cache database file. When absent, the cache
    /// lives in the default location under the user's data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Directory holding imported Tatoeba corpus files. When absent, the
    /// default location under the user's data directory is scanned.
    #[serde(default)]
    pub tatoeba_data_dir: Option<PathBuf>,

    /// Language assumed when a lookup names neither a language nor providers
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Per-provider settings
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Per-provider configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProvidersConfig {
    /// Nadeshiko settings
    #[serde(default)]
    pub nadeshiko: NadeshikoConfig,
}

/// Nadeshiko provider configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct NadeshikoConfig {
    /// API key; the provider refuses to fetch without one
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Corresponding log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    "eng".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            tatoeba_data_dir: None,
            default_language: default_language(),
            providers: ProvidersConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location, falling back to
    /// defaults when no config file exists yet
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base_dir = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;
        Ok(base_dir.join("sentex").join("config.json"))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.default_language.trim().is_empty() {
            return Err(anyhow!("Default language must not be empty"));
        }
        if let Some(api_key) = &self.providers.nadeshiko.api_key {
            if api_key.trim().is_empty() {
                return Err(anyhow!(
                    "Nadeshiko API key is set but empty; remove it or provide a value"
                ));
            }
        }
        Ok(())
    }
}
