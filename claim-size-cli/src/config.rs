//! Configuration management for claim-size-calculator
//!
//! Config file: ~/.claim-size-calculator/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// claim-size-calculator configuration
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub node: NodeConfig,
    pub log: LogConfig,
}

/// Default Lotus node to query when neither flags nor the environment name one
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Multiaddr or URL of the full node API
    pub api_url: Option<String>,
    /// API token (read permission is sufficient)
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Get the config directory (~/.claim-size-calculator)
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".claim-size-calculator")
}

/// Get the default config file path (~/.claim-size-calculator/config.toml)
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load configuration.
///
/// With no explicit path a missing default file yields [`Config::default`];
/// an explicit path must exist.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = config_path();
            if !path.exists() {
                return Ok(Config::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}
