//! Configuration file loading.

use crate::error::ConfigError;
use crate::types::WatchConfig;
use std::path::Path;

/// Loads and parses a watch configuration file from `path`.
pub fn load_config(path: &Path) -> Result<WatchConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses a watch configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<WatchConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
}
