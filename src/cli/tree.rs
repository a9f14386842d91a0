//! Display the artifact set as a hierarchical tree.
//!
//! Renders the materialized tree with box-drawing characters in display
//! order (directories before files, case-sensitive name order within each
//! group), similar to `cargo tree`:
//!
//! ```text
//! src
//! ├── main
//! │   └── java
//! │       └── App.java
//! └── test
//!     └── AppTest.java
//! README.md
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::common::ClientOptions;
use crate::tree::TreeNode;

/// Command to display the artifact tree.
#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Output format (tree, json)
    #[arg(short = 'f', long, default_value = "tree")]
    format: String,

    /// Maximum depth to display (unlimited if not specified)
    #[arg(short = 'd', long)]
    depth: Option<usize>,
}

impl TreeCommand {
    /// Fetch the artifact set and render it.
    pub async fn execute(self, options: &ClientOptions) -> Result<()> {
        self.validate_arguments()?;

        let mut session = options.open_session().await?;
        session.activate().await?;

        let root = session.tree();
        match self.format.as_str() {
            "json" => {
                let children: Vec<serde_json::Value> = root
                    .sorted_children()
                    .into_iter()
                    .map(|child| self.node_to_json(child, 1))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&children)?);
            }
            _ => {
                if root.children.is_empty() {
                    println!("No artifacts found.");
                    return Ok(());
                }
                self.print_children(root, "", 0);
                let count = root.file_count();
                let noun = if count == 1 { "file" } else { "files" };
                println!();
                println!("{}", format!("{count} {noun}").bright_black());
            }
        }

        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "tree" | "json" => {}
            other => {
                return Err(anyhow::anyhow!(
                    "Invalid format '{other}'. Valid formats are: tree, json"
                ));
            }
        }

        if self.depth == Some(0) {
            return Err(anyhow::anyhow!("Depth must be at least 1"));
        }

        Ok(())
    }

    fn print_children(&self, node: &TreeNode, prefix: &str, current_depth: usize) {
        if let Some(max_depth) = self.depth
            && current_depth >= max_depth
        {
            return;
        }

        let children = node.sorted_children();
        let top_level = node.is_root();
        for (i, child) in children.iter().enumerate() {
            let is_last = i == children.len() - 1;

            // Top-level entries print flush left, matching how an explorer
            // renders the root's contents.
            let connector = if top_level {
                ""
            } else if is_last {
                "└── "
            } else {
                "├── "
            };
            let name = if child.is_file {
                child.name.normal()
            } else {
                child.name.cyan()
            };
            println!("{prefix}{connector}{name}");

            let child_prefix = if top_level {
                prefix.to_string()
            } else if is_last {
                format!("{prefix}    ")
            } else {
                format!("{prefix}│   ")
            };
            self.print_children(child, &child_prefix, current_depth + 1);
        }
    }

    fn node_to_json(&self, node: &TreeNode, depth: usize) -> serde_json::Value {
        let children: Vec<serde_json::Value> = match self.depth {
            Some(max_depth) if depth >= max_depth => Vec::new(),
            _ => node
                .sorted_children()
                .into_iter()
                .map(|child| self.node_to_json(child, depth + 1))
                .collect(),
        };

        serde_json::json!({
            "name": node.name,
            "path": node.full_path,
            "type": if node.is_file { "file" } else { "directory" },
            "children": children,
        })
    }
}
