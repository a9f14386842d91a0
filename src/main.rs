//! genx CLI entry point.
//!
//! Handles command-line parsing, error display, and command execution. The
//! commands themselves live in [`genx_cli::cli`]:
//! - `list` - list generated artifact paths
//! - `tree` - display the artifact set as a tree
//! - `show` - print one artifact's content
//! - `export` - download the packaged archive
//! - `config` - manage global configuration

use anyhow::Result;
use clap::Parser;
use genx_cli::cli;
use genx_cli::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            // Convert to a user-friendly error with a contextual hint
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
