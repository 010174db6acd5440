//! Configuration management for Weekhours

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    /// Quiet period before a form change reaches the engine
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl EditorConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn default_debounce_ms() -> u64 {
    800
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter, overridden by RUST_LOG
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from weekhours.toml
    pub fn load() -> Result<Self> {
        Self::load_from("weekhours.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;

            return Self::parse(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()));
        }

        // Fall back to environment variables only
        Ok(Self::from_env())
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration entirely from environment variables
    pub fn from_env() -> Self {
        Config {
            editor: EditorConfig {
                debounce_ms: std::env::var("WEEKHOURS_DEBOUNCE_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_debounce_ms),
            },
            logging: LoggingConfig {
                filter: std::env::var("WEEKHOURS_LOG").unwrap_or_else(|_| default_log_filter()),
            },
        }
    }
}
