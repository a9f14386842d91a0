//! Download the packaged archive of the current artifact set.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use super::common::ClientOptions;

/// Command to export the artifact bundle to disk.
///
/// The archive is produced server-side and saved verbatim; the filename
/// comes from the response's content-disposition header, with a fixed
/// fallback when the header is absent or unparseable.
#[derive(Args, Debug)]
pub struct ExportCommand {
    /// Directory to save the bundle into (defaults to the current
    /// directory)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,
}

impl ExportCommand {
    /// Download the bundle and report where it was written.
    pub async fn execute(self, options: &ClientOptions) -> Result<()> {
        let session = options.open_session().await?;

        let dir = match self.output {
            Some(dir) => {
                tokio::fs::create_dir_all(&dir)
                    .await
                    .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
                dir
            }
            None => std::env::current_dir().context("Could not determine current directory")?,
        };

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}").expect("valid spinner template"),
        );
        spinner.set_message("Downloading artifact bundle...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = session.save_bundle(&dir).await;
        spinner.finish_and_clear();

        let written = result?;
        println!("{} {}", "Exported".green().bold(), written.display());
        Ok(())
    }
}
