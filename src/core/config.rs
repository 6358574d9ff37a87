//! Configuration management for replkit
//!
//! Supports environment variables, config files, and runtime overrides.
//! Editing mode, colors, and error catching are all tunable via settings.
//!
//! Config file location: ~/.config/replkit/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{ReplError, Result};

/// Main configuration for a REPL runner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplConfig {
    /// Line editor configuration
    #[serde(default)]
    pub editor: EditorConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Loop behavior configuration
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Line editor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Use vi editing mode at the prompt
    pub vi_mode: bool,
    /// Maximum number of in-process history entries
    /// Default: 500
    pub history_size: usize,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Whether to colorize prompts, help, and error banners
    pub color: bool,
}

/// Loop behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Catch errors escaping command handlers and keep the loop alive.
    /// Disabled for debugging, where the first handler error should abort
    /// the loop with a full error.
    pub catch_errors: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            vi_mode: env::var("REPLKIT_VI_MODE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            history_size: 500,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: !env::var("REPLKIT_NO_COLOR")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            catch_errors: !env::var("REPLKIT_DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

impl ReplConfig {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("replkit")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: env vars > config file > defaults
    pub fn load() -> Self {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        if let Ok(config) = Self::load_from_file() {
            return config;
        }

        // Fall back to defaults (which respect env vars)
        Self::default()
    }

    /// Load configuration from the default config file only
    pub fn load_from_file() -> Result<Self> {
        Self::load_from_path(&Self::config_file())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReplError::config("config file not found"));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ReplError::config(format!("failed to read config: {}", e)))?;

        let config: ReplConfig = toml::from_str(&content)
            .map_err(|e| ReplError::config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to the default config file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .map_err(|e| ReplError::config(format!("failed to create config dir: {}", e)))?;
        }
        self.save_to_path(&Self::config_file())
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ReplError::config(format!("failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| ReplError::config(format!("failed to write config: {}", e)))?;

        Ok(())
    }

    /// Check if a config file exists
    pub fn config_exists() -> bool {
        Self::config_file().exists()
    }

    /// Generate a default config file content for display
    pub fn default_config_toml() -> String {
        let config = ReplConfig::default();
        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| String::from("# Error generating config"))
    }
}
