//! Configuration for the voxgate CA gateway.
//!
//! Provides configuration parsing and validation with safe defaults:
//!
//! - [`server`]: HTTP listener configuration
//! - [`ca`]: upstream Puppet/OpenVox CA connection settings
//! - [`validation`]: field and cross-field validation functions

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub mod ca;
pub mod server;
pub mod validation;

pub use ca::CaConfig;
pub use server::ServerConfig;

/// Top-level configuration for the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP listener configuration
    #[validate]
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream CA configuration
    #[validate]
    #[serde(default)]
    pub ca: CaConfig,
}

impl Config {
    /// Load configuration from a file, dispatching on the extension.
    ///
    /// Supported formats: TOML (`.toml`) and JSON (`.json`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("toml");

        match extension {
            "toml" => Self::from_toml(&content),
            "json" => Self::from_json(&content),
            _ => Err(anyhow::anyhow!("Unsupported config format: {}", extension)),
        }
    }

    /// Parse and validate a TOML configuration document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse TOML config")?;
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(content).context("Failed to parse JSON config")?;
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}
