//! Configuration management for the A4 Stock Tracker client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with A4STOCK_ prefix

use std::path::PathBuf;
use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Backend API configuration
    pub api: ApiConfig,

    /// Export output configuration
    pub export: ExportConfig,

    /// Entry form defaults
    pub entry: EntryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base address of the stock API, e.g. http://192.168.1.126:8000
    pub base_url: String,

    /// Transport timeout per request in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    /// Directory downloaded reports are written to
    pub output_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EntryConfig {
    /// Colour preselected on a fresh entry when it exists
    pub default_color: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("A4STOCK_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("api.base_url", "http://127.0.0.1:8000")?
            .set_default("api.timeout_secs", 30)?
            .set_default("export.output_dir", ".")?
            .set_default("entry.default_color", shared::DEFAULT_COLOR_NAME)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (A4STOCK_ prefix)
            .add_source(
                Environment::with_prefix("A4STOCK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            api: ApiConfig::default(),
            export: ExportConfig {
                output_dir: PathBuf::from("."),
            },
            entry: EntryConfig {
                default_color: shared::DEFAULT_COLOR_NAME.to_string(),
            },
        }
    }
}
