//! Manage the global genx configuration.
//!
//! The configuration lives at `~/.genx/config.toml` (see
//! [`crate::config::GlobalConfig`]) and holds the generation-service URL
//! plus the client-side policy knobs. `show` is the default action:
//!
//! ```bash
//! genx config            # same as `genx config show`
//! genx config path
//! genx config set-url http://gen.internal:8000
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use super::common::ClientOptions;
use crate::config::GlobalConfig;

/// Command to inspect and edit the global configuration.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: Option<ConfigSubcommand>,
}

/// Configuration actions.
#[derive(Subcommand, Debug)]
enum ConfigSubcommand {
    /// Display the current configuration (default)
    Show,

    /// Print the configuration file path
    Path,

    /// Set the generation-service URL
    SetUrl {
        /// The new base URL, e.g. http://127.0.0.1:8000
        url: String,
    },
}

impl ConfigCommand {
    /// Execute the requested configuration action.
    pub async fn execute(self, options: &ClientOptions) -> Result<()> {
        match self.command.unwrap_or(ConfigSubcommand::Show) {
            ConfigSubcommand::Show => {
                let config = options.load_config().await?;
                println!("{} {}", "server_url:".cyan(), config.server_url);
                println!(
                    "{} {}",
                    "freshness_window_secs:".cyan(),
                    config.freshness_window_secs
                );
                println!(
                    "{} {}",
                    "request_timeout_secs:".cyan(),
                    config.request_timeout_secs
                );
                Ok(())
            }
            ConfigSubcommand::Path => {
                println!("{}", Self::config_path(options)?.display());
                Ok(())
            }
            ConfigSubcommand::SetUrl { url } => {
                let path = Self::config_path(options)?;
                let mut config = GlobalConfig::load_from(&path).await?;
                config.server_url = url;
                config.save_to(&path).await?;
                println!("{} server_url = {}", "Updated".green().bold(), config.server_url);
                Ok(())
            }
        }
    }

    fn config_path(options: &ClientOptions) -> Result<PathBuf> {
        match &options.config_path {
            Some(path) => Ok(path.clone()),
            None => GlobalConfig::default_path(),
        }
    }
}
