//! Print the content of one generated artifact.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::common::ClientOptions;
use crate::content::display_hint;

/// Command to print a single artifact's normalized content.
#[derive(Args, Debug)]
pub struct ShowCommand {
    /// Path of the artifact to show (as printed by `genx list`)
    path: String,

    /// Print the display hint (highlighting language) before the content
    #[arg(long)]
    hint: bool,
}

impl ShowCommand {
    /// Fetch the artifact set and print the requested file.
    pub async fn execute(self, options: &ClientOptions) -> Result<()> {
        let mut session = options.open_session().await?;
        session.activate().await?;

        if !session.select_file(&self.path) {
            return Err(anyhow::anyhow!(
                "artifact '{}' not found in the generated set ({} artifacts available)",
                self.path,
                session.artifact_count()
            ));
        }

        if self.hint {
            println!("{}", display_hint(&self.path).bright_black());
        }
        if let Some(content) = session.selected_content() {
            println!("{content}");
        }

        Ok(())
    }
}
