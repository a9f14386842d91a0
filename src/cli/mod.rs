//! Command-line interface for genx.
//!
//! Each command lives in its own module with its own argument struct and
//! execution logic, dispatched from the [`Cli`] root. All commands talk to
//! the generation service through a [`crate::session::BrowserSession`]
//! built from the global configuration plus any per-invocation overrides.
//!
//! # Available Commands
//!
//! - `list` - flat listing of generated artifact paths
//! - `tree` - hierarchical view of the artifact set
//! - `show` - print one artifact's normalized content
//! - `export` - download the packaged archive of the artifact set
//! - `config` - manage the global configuration
//!
//! # Global Options
//!
//! - `--server <URL>` - override the configured service address
//! - `--config <PATH>` - use a specific configuration file
//! - `--verbose` / `--quiet` - logging verbosity (`RUST_LOG` wins when set)

mod common;
mod config;
mod export;
mod list;
mod show;
mod tree;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use common::ClientOptions;

/// Top-level CLI for genx.
#[derive(Parser)]
#[command(
    name = "genx",
    about = "Browse and export artifacts produced by a document-to-code generation service",
    version,
    author
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the configured generation-service URL.
    #[arg(long, global = true, value_name = "URL")]
    server: Option<String>,

    /// Path to a specific configuration file.
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug output.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress everything except errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List generated artifact paths.
    List(list::ListCommand),

    /// Display the artifact set as a tree.
    Tree(tree::TreeCommand),

    /// Print the content of one generated artifact.
    Show(show::ShowCommand),

    /// Download the packaged archive of the artifact set.
    Export(export::ExportCommand),

    /// Manage the global configuration.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        let options = ClientOptions {
            server: self.server,
            config_path: self.config,
        };

        match self.command {
            Commands::List(cmd) => cmd.execute(&options).await,
            Commands::Tree(cmd) => cmd.execute(&options).await,
            Commands::Show(cmd) => cmd.execute(&options).await,
            Commands::Export(cmd) => cmd.execute(&options).await,
            Commands::Config(cmd) => cmd.execute(&options).await,
        }
    }

    /// Install the tracing subscriber. An explicit `RUST_LOG` takes
    /// precedence over the verbosity flags.
    fn init_logging(&self) {
        let default_level = if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
