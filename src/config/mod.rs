// Configuration Management Module
// Handles geode.toml loading, defaults, and validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Main marketplace configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Behavior of the simulated API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Fixed pause applied to every simulated call before it resolves.
    #[serde(default = "default_latency_ms")]
    pub simulated_latency_ms: u64,

    /// Start the catalog with the fixed demo records.
    #[serde(default = "default_true")]
    pub seed_catalog: bool,
}

/// Input bounds enforced by the dispatchers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_min_username_len")]
    pub min_username_len: usize,

    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    #[serde(default = "default_max_logo_bytes")]
    pub max_logo_bytes: u64,
}

// Default value functions
fn default_latency_ms() -> u64 { 500 }
fn default_min_username_len() -> usize { 3 }
fn default_min_password_len() -> usize { 6 }
fn default_max_logo_bytes() -> u64 { 2 * 1024 * 1024 }
fn default_true() -> bool { true }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: default_latency_ms(),
            seed_catalog: default_true(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_username_len: default_min_username_len(),
            min_password_len: default_min_password_len(),
            max_logo_bytes: default_max_logo_bytes(),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl MarketConfig {
    /// Load configuration from file or use defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            info!("Loading configuration from {}", path.display());
            let contents = std::fs::read_to_string(path)
                .context("Failed to read configuration file")?;

            let config: MarketConfig = toml::from_str(&contents)
                .context("Failed to parse configuration file")?;

            config.validate()?;
            Ok(config)
        } else {
            warn!("Configuration file not found, using defaults");
            info!("Create geode.toml to customize configuration");
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.limits.min_username_len == 0 {
            anyhow::bail!("Minimum username length must be at least 1");
        }

        if self.limits.min_password_len == 0 {
            anyhow::bail!("Minimum password length must be at least 1");
        }

        if self.limits.max_logo_bytes == 0 {
            anyhow::bail!("Logo size limit must be at least 1 byte");
        }

        // Latency beyond a minute makes the demo unusable
        if self.api.simulated_latency_ms > 60_000 {
            anyhow::bail!("Simulated latency must be at most 60000 ms");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = MarketConfig::default();
        assert_eq!(config.api.simulated_latency_ms, 500);
        assert_eq!(config.limits.min_username_len, 3);
        assert_eq!(config.limits.max_logo_bytes, 2 * 1024 * 1024);
        assert!(config.api.seed_catalog);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_limits() {
        let mut config = MarketConfig::default();
        config.limits.min_password_len = 0;
        assert!(config.validate().is_err());

        let mut config = MarketConfig::default();
        config.api.simulated_latency_ms = 120_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = MarketConfig::load("/nonexistent/geode.toml").unwrap();
        assert_eq!(config.api.simulated_latency_ms, 500);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geode.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[api]\nsimulated_latency_ms = 0").unwrap();

        let config = MarketConfig::load(&path).unwrap();
        assert_eq!(config.api.simulated_latency_ms, 0);
        // Unspecified sections keep their defaults
        assert_eq!(config.limits.min_password_len, 6);
    }
}
