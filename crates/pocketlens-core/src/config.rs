//! Client configuration
//!
//! ## Configuration Resolution
//!
//! Settings are resolved in layers, later layers winning:
//! 1. Embedded defaults (compiled into binary)
//! 2. Override file (~/.config/pocketlens/config.toml, or an explicit path)
//! 3. Environment variables (`POCKETLENS_API_URL`, `POCKETLENS_TOKEN`,
//!    `POCKETLENS_TIMEOUT_SECS`)
//!
//! Callers such as the CLI apply their own flags on top.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/pocketlens.toml");

pub const ENV_API_URL: &str = "POCKETLENS_API_URL";
pub const ENV_TOKEN: &str = "POCKETLENS_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "POCKETLENS_TIMEOUT_SECS";

/// Resolved client settings
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the finance API, without trailing slash
    pub api_base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Bearer token, if one is configured
    pub access_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            timeout: Duration::from_secs(30),
            access_token: None,
        }
    }
}

/// On-disk representation; every key is optional so files can be partial
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    api_base_url: Option<String>,
    timeout_secs: Option<u64>,
    access_token: Option<String>,
}

impl ClientConfig {
    /// Config with an explicit base URL and defaults for everything else
    pub fn with_base_url(url: &str) -> Self {
        Self {
            api_base_url: normalize_base_url(url),
            ..Self::default()
        }
    }

    /// Load embedded defaults, then the override file, then the environment
    ///
    /// With `path = None` the platform default path is used and a missing file
    /// is fine. An explicit path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::from_toml(DEFAULT_CONFIG)?;

        match path {
            Some(p) => {
                let contents = fs::read_to_string(p).map_err(|e| {
                    Error::Config(format!("Cannot read config {}: {}", p.display(), e))
                })?;
                config.apply_toml(&contents)?;
                tracing::debug!(path = %p.display(), "Loaded config override");
            }
            None => {
                if let Some(p) = default_config_path().filter(|p| p.exists()) {
                    let contents = fs::read_to_string(&p)?;
                    config.apply_toml(&contents)?;
                    tracing::debug!(path = %p.display(), "Loaded config override");
                }
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML document on top of the built-in defaults
    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config = Self::default();
        config.apply_toml(contents)?;
        Ok(config)
    }

    fn apply_toml(&mut self, contents: &str) -> Result<()> {
        let file: ConfigFile = toml::from_str(contents)?;
        if let Some(url) = file.api_base_url {
            self.api_base_url = normalize_base_url(&url);
        }
        if let Some(secs) = file.timeout_secs {
            if secs == 0 {
                return Err(Error::Config(
                    "timeout_secs must be greater than 0".to_string(),
                ));
            }
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(token) = file.access_token.filter(|t| !t.is_empty()) {
            self.access_token = Some(token);
        }
        Ok(())
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.api_base_url = normalize_base_url(&url);
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.is_empty()) {
            self.access_token = Some(token);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => self.timeout = Duration::from_secs(secs),
                _ => {
                    tracing::warn!(value = %raw, "Ignoring invalid {}", ENV_TIMEOUT_SECS);
                }
            }
        }
    }
}

/// Platform config file path (~/.config/pocketlens/config.toml on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pocketlens").join("config.toml"))
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
