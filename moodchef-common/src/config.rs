//! Bootstrap configuration and credential resolution
//!
//! Two sources feed the configuration:
//! 1. **TOML bootstrap file**: catalog queries, pipeline tuning, logging, server address
//! 2. **Environment**: credentials (catalog API key, database URL), which override TOML
//!
//! Config file location priority:
//! 1. Command-line argument (highest priority)
//! 2. `MOODCHEF_CONFIG` environment variable
//! 3. OS-dependent default (`~/.config/moodchef/config.toml` on Linux)
//!
//! A missing config file is not an error; built-in defaults apply.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the TOML config file
pub const CONFIG_PATH_ENV: &str = "MOODCHEF_CONFIG";
/// Environment variable holding the recipe catalog API key
pub const CATALOG_API_KEY_ENV: &str = "MOODCHEF_CATALOG_API_KEY";
/// Environment variable holding the destination store URL
pub const DATABASE_URL_ENV: &str = "MOODCHEF_DATABASE_URL";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TomlConfig {
    pub catalog: CatalogConfig,
    pub store: StoreConfig,
    pub pipeline: PipelineSettings,
    pub logging: LoggingConfig,
    pub server: ServerConfig,
}

/// Recipe catalog (source API) settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// API key; `MOODCHEF_CATALOG_API_KEY` takes precedence
    pub api_key: Option<String>,
    /// Base URL of the catalog API
    pub base_url: String,
    /// Value sent in the `X-RapidAPI-Host` header
    pub host: String,
    /// Records requested per query
    pub page_size: u32,
    /// Search queries issued concurrently on every run
    pub queries: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://tasty.p.rapidapi.com".to_string(),
            host: "tasty.p.rapidapi.com".to_string(),
            page_size: 40,
            queries: default_queries(),
        }
    }
}

fn default_queries() -> Vec<String> {
    [
        "comfort food",
        "spicy",
        "dessert",
        "healthy",
        "quick",
        "breakfast",
        "soup",
        "party",
        "vegetarian",
        "high protein",
    ]
    .iter()
    .map(|q| q.to_string())
    .collect()
}

/// Destination store settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite URL or file path; `MOODCHEF_DATABASE_URL` takes precedence
    pub database_url: Option<String>,
}

/// Pipeline tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Target (and cap) of approved recipes per mood category
    pub target_per_category: usize,
    /// Records per persistence batch
    pub batch_size: usize,
    /// Probability that a stored recipe is flagged premium
    pub premium_probability: f64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            target_per_category: 15,
            batch_size: 50,
            premium_probability: 0.3,
        }
    }
}

impl PipelineSettings {
    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.target_per_category == 0 {
            return Err(Error::Config(
                "pipeline.target_per_category must be at least 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(Error::Config(
                "pipeline.batch_size must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.premium_probability) {
            return Err(Error::Config(format!(
                "pipeline.premium_probability must be within 0.0..=1.0 (got {})",
                self.premium_probability
            )));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` overrides
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// HTTP trigger settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5780".to_string(),
        }
    }
}

/// Resolve the config file path (CLI → ENV → OS default)
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir().map(|d| d.join("moodchef").join("config.toml"))
}

/// Load TOML configuration, falling back to defaults when the file is absent
pub fn load_toml_config(path: Option<&Path>) -> Result<TomlConfig> {
    let path = match path {
        Some(path) if path.exists() => path,
        Some(path) => {
            info!("Config file {} not found, using defaults", path.display());
            return Ok(TomlConfig::default());
        }
        None => return Ok(TomlConfig::default()),
    };

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed: {}", e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Validate a credential (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Resolve a credential from ENV, then TOML
///
/// `label` is used in log lines and in the error message when nothing is configured.
pub fn resolve_credential(
    label: &str,
    env_var: &str,
    toml_value: Option<&String>,
    toml_key: &str,
) -> Result<String> {
    let env_value = std::env::var(env_var).ok().filter(|v| is_valid_key(v));
    let toml_value = toml_value.filter(|v| is_valid_key(v));

    if env_value.is_some() && toml_value.is_some() {
        warn!(
            "{} found in both environment and TOML. Using environment (highest priority).",
            label
        );
    }

    if let Some(value) = env_value {
        info!("{} loaded from environment variable", label);
        return Ok(value.trim().to_string());
    }

    if let Some(value) = toml_value {
        info!("{} loaded from TOML config", label);
        return Ok(value.trim().to_string());
    }

    Err(Error::Config(format!(
        "{} not configured. Please configure using one of:\n\
         1. Environment: {}=...\n\
         2. TOML config: {} = \"...\"",
        label, env_var, toml_key
    )))
}

/// Resolve the catalog API key (ENV → TOML)
pub fn resolve_catalog_api_key(config: &TomlConfig) -> Result<String> {
    resolve_credential(
        "Catalog API key",
        CATALOG_API_KEY_ENV,
        config.catalog.api_key.as_ref(),
        "[catalog] api_key",
    )
}

/// Resolve the destination database URL (ENV → TOML)
pub fn resolve_database_url(config: &TomlConfig) -> Result<String> {
    resolve_credential(
        "Database URL",
        DATABASE_URL_ENV,
        config.store.database_url.as_ref(),
        "[store] database_url",
    )
}
