//! Flat listing of generated artifact paths.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::common::ClientOptions;

/// Command to list the paths of the current artifact set.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Output format (text, json)
    #[arg(short = 'f', long, default_value = "text")]
    format: String,
}

impl ListCommand {
    /// Fetch the artifact set and print its paths.
    pub async fn execute(self, options: &ClientOptions) -> Result<()> {
        self.validate_arguments()?;

        let mut session = options.open_session().await?;
        session.activate().await?;

        match self.format.as_str() {
            "json" => {
                let paths: Vec<&String> = session.artifacts().keys().collect();
                println!("{}", serde_json::to_string_pretty(&paths)?);
            }
            _ => {
                for path in session.artifacts().keys() {
                    println!("{path}");
                }
                let count = session.artifact_count();
                let noun = if count == 1 { "artifact" } else { "artifacts" };
                println!("{}", format!("{count} {noun}").bright_black());
            }
        }

        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(anyhow::anyhow!(
                "Invalid format '{other}'. Valid formats are: text, json"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_arguments_accepts_known_formats() {
        for format in ["text", "json"] {
            let cmd = ListCommand {
                format: format.to_string(),
            };
            assert!(cmd.validate_arguments().is_ok());
        }
    }

    #[test]
    fn test_validate_arguments_rejects_unknown_format() {
        let cmd = ListCommand {
            format: "yaml".to_string(),
        };
        let result = cmd.validate_arguments();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid format"));
    }
}
