//! Shared plumbing for CLI commands: configuration resolution and session
//! construction.

use anyhow::Result;
use std::path::PathBuf;

use crate::client::HttpApi;
use crate::config::GlobalConfig;
use crate::session::BrowserSession;

/// Per-invocation overrides collected from the global CLI flags.
pub struct ClientOptions {
    /// `--server` override for the service URL.
    pub server: Option<String>,
    /// `--config` override for the configuration file path.
    pub config_path: Option<PathBuf>,
}

impl ClientOptions {
    /// Load the global configuration, honoring `--config`.
    pub async fn load_config(&self) -> Result<GlobalConfig> {
        match &self.config_path {
            Some(path) => GlobalConfig::load_from(path).await,
            None => GlobalConfig::load().await,
        }
    }

    /// Build a dormant session against the resolved server URL. Commands
    /// call `activate()` themselves when they need artifact data.
    pub async fn open_session(&self) -> Result<BrowserSession<HttpApi>> {
        let config = self.load_config().await?;
        let server_url = self
            .server
            .clone()
            .unwrap_or_else(|| config.server_url.clone());
        let api = HttpApi::new(server_url, config.request_timeout())?;
        Ok(BrowserSession::new(api, config.freshness_window()))
    }
}
