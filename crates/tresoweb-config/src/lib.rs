//! Configuration management for tresoweb
//!
//! This module handles loading, validation, and management of
//! tresoweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Snapshot data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the directory holding snapshot exports
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Snapshot file with the tiers (parties) records
    #[serde(default = "default_tiers_file")]
    pub tiers_file: String,
    /// Snapshot file with the treasury transaction records
    #[serde(default = "default_transactions_file")]
    pub transactions_file: String,
    /// Snapshot file with the purchase records
    #[serde(default = "default_purchases_file")]
    pub purchases_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            tiers_file: default_tiers_file(),
            transactions_file: default_transactions_file(),
            purchases_file: default_purchases_file(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_tiers_file() -> String {
    "tiers.json".to_string()
}

fn default_transactions_file() -> String {
    "transactions.json".to_string()
}

fn default_purchases_file() -> String {
    "purchases.json".to_string()
}

/// Filter behaviour settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Quiet window for free-text input, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    300
}

impl FilterConfig {
    /// Debounce window as a Duration
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Amount display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Default currency code
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Number of decimal places for amounts
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_sep(),
        }
    }
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_sep() -> String {
    ",".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Snapshot data settings
    #[serde(default)]
    pub data: DataConfig,
    /// Filter behaviour settings
    #[serde(default)]
    pub filter: FilterConfig,
    /// Amount display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound { path: path.to_string_lossy().to_string() }
            } else {
                ConfigError::IoError
            }
        })?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.filter.debounce_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "filter.debounce_ms".to_string(),
                reason: "Debounce window must be greater than 0".to_string(),
            });
        }

        if self.filter.debounce_ms > 10_000 {
            return Err(ConfigError::InvalidValue {
                field: "filter.debounce_ms".to_string(),
                reason: "Debounce window must be at most 10000 ms".to_string(),
            });
        }

        if self.display.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "display.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        match self.logging.level.as_str() {
            "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "logging.level".to_string(),
                    reason: format!("Unknown log level: {}", other),
                });
            }
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}

// ==================== Tests ====================
