//! Global configuration management for genx.
//!
//! This module handles the global user configuration file
//! (`~/.genx/config.toml`) which stores the generation-service address and
//! the client-side policy knobs (freshness window, request timeout). The
//! file is optional: a missing file means defaults.
//!
//! # Configuration File Location
//!
//! - **Unix/macOS**: `~/.genx/config.toml`
//! - **Windows**: `%USERPROFILE%\.genx\config.toml`
//!
//! The location can be overridden with the `GENX_CONFIG_PATH` environment
//! variable, which tests and CI use to isolate themselves from the real
//! home directory.
//!
//! # File Format
//!
//! ```toml
//! server_url = "http://127.0.0.1:8000"
//! freshness_window_secs = 5
//! request_timeout_secs = 30
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

use crate::constants::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_SERVER_URL, FRESHNESS_WINDOW_SECS};

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

const fn default_freshness_window_secs() -> u64 {
    FRESHNESS_WINDOW_SECS
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

/// Global configuration for genx.
///
/// All fields have defaults, so any subset may appear in the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Base URL of the generation service.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Minimum elapsed seconds before a non-forced fetch re-hits the
    /// network.
    #[serde(default = "default_freshness_window_secs")]
    pub freshness_window_secs: u64,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            freshness_window_secs: default_freshness_window_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GlobalConfig {
    /// Resolve the configuration file path: `GENX_CONFIG_PATH` if set,
    /// otherwise `~/.genx/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("GENX_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }
        Ok(dirs::home_dir()
            .context("Could not determine home directory")?
            .join(".genx")
            .join("config.toml"))
    }

    /// Load the configuration from the default location. A missing file
    /// yields the defaults.
    pub async fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?).await
    }

    /// Load the configuration from a specific path. A missing file yields
    /// the defaults; a present-but-invalid file is an error.
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save the configuration to the default location, creating the parent
    /// directory if needed.
    pub async fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?).await
    }

    /// Save the configuration to a specific path.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        debug!("saved configuration to {}", path.display());
        Ok(())
    }

    /// The freshness window as a [`chrono::Duration`], for comparison
    /// against fetch timestamps.
    pub fn freshness_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.freshness_window_secs as i64)
    }

    /// The HTTP request timeout as a [`std::time::Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
