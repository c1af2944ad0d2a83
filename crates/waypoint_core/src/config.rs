//! Configuration system for Waypoint
//!
//! This module provides configuration structures and utilities for persisting
//! selection and research settings across sessions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    CoreError, CountryCode, Result,
    aggregate::ResearchSettings,
    error::ConfigError,
    selection::{OrderingPolicy, OrderingRegistry},
};

/// Top-level configuration for Waypoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaypointConfig {
    /// Statistics selection configuration
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Default research pool settings
    #[serde(default)]
    pub research: ResearchSettings,
}

/// Statistics selection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Ordering policy used for every country without an override
    #[serde(default = "default_ordering")]
    pub ordering: String,

    /// Per-country ordering overrides, keyed by country code
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub country_ordering: BTreeMap<String, String>,
}

fn default_ordering() -> String {
    "shuffled".to_string()
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            ordering: default_ordering(),
            country_ordering: BTreeMap::new(),
        }
    }
}

impl WaypointConfig {
    /// Load configuration from standard locations
    pub async fn load() -> Result<Self> {
        load_config_from_standard_locations().await
    }

    /// Load configuration from a specific file
    pub async fn load_from(path: &Path) -> Result<Self> {
        load_config(path).await
    }

    /// Save configuration to a specific file
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        save_config(self, path).await
    }

    /// Ordering policy for a country, falling back to the global policy
    pub fn ordering_for(
        &self,
        country: CountryCode,
        registry: &OrderingRegistry,
    ) -> Result<Arc<dyn OrderingPolicy>> {
        let name = self
            .selection
            .country_ordering
            .iter()
            .find(|(code, _)| CountryCode::lookup(code) == Some(country))
            .map(|(_, name)| name.as_str())
            .unwrap_or(self.selection.ordering.as_str());

        registry.resolve(name)
    }

    /// Check every configured name against the registry
    pub fn validate(&self, registry: &OrderingRegistry) -> Result<()> {
        registry.resolve(&self.selection.ordering)?;
        for (code, name) in &self.selection.country_ordering {
            code.parse::<CountryCode>()?;
            registry.resolve(name)?;
        }
        Ok(())
    }
}

// Utility functions

/// Load configuration from a TOML file
pub async fn load_config(path: &Path) -> Result<WaypointConfig> {
    let content =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CoreError::ConfigurationError {
                config_path: path.display().to_string(),
                field: "file".to_string(),
                expected: "readable TOML file".to_string(),
                cause: ConfigError::Io(e.to_string()),
            })?;

    toml::from_str(&content).map_err(|e| CoreError::ConfigurationError {
        config_path: path.display().to_string(),
        field: "content".to_string(),
        expected: "valid TOML configuration".to_string(),
        cause: ConfigError::TomlParse(e.to_string()),
    })
}

/// Save configuration to a TOML file
pub async fn save_config(config: &WaypointConfig, path: &Path) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CoreError::ConfigurationError {
                    config_path: parent.display().to_string(),
                    field: "directory".to_string(),
                    expected: "writable directory".to_string(),
                    cause: ConfigError::Io(e.to_string()),
                })?;
        }
    }

    let content = toml::to_string_pretty(config).map_err(|e| CoreError::ConfigurationError {
        config_path: path.display().to_string(),
        field: "serialization".to_string(),
        expected: "serializable config structure".to_string(),
        cause: ConfigError::TomlSerialize(e.to_string()),
    })?;

    tokio::fs::write(path, content)
        .await
        .map_err(|e| CoreError::ConfigurationError {
            config_path: path.display().to_string(),
            field: "file".to_string(),
            expected: "writable file location".to_string(),
            cause: ConfigError::Io(e.to_string()),
        })?;

    Ok(())
}

/// Standard config file locations
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // Project-specific config
    paths.push(PathBuf::from("waypoint.toml"));

    // User config directory
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("waypoint").join("config.toml"));
    }

    // Home directory fallback
    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".waypoint").join("config.toml"));
    }

    paths
}

/// Load configuration from standard locations
pub async fn load_config_from_standard_locations() -> Result<WaypointConfig> {
    for path in config_paths() {
        if path.exists() {
            tracing::info!("Loading config from {}", path.display());
            return load_config(&path).await;
        }
    }

    // No config found, return default
    Ok(WaypointConfig::default())
}
