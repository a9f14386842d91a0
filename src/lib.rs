//! genx - client-side browser for a document-to-code generation service.
//!
//! A user submits a requirements document to a remote generation service;
//! genx fetches the resulting set of generated files, materializes a
//! directory tree out of their paths, tracks navigation state (expanded
//! folders, selected file) and exports the packaged archive of the set.
//!
//! # Architecture Overview
//!
//! Data flows one way: remote service -> [`session::ArtifactStore`] (fetch,
//! normalization, freshness throttling) -> flat mapping -> [`tree`] (pure
//! rebuild) -> [`nav::NavigationState`] (selection and expansion) -> the
//! presentation layer, which only reads. Control flows the other way: user
//! actions and "generation finished" signals drive
//! [`session::BrowserSession`], which updates the store and the navigation
//! state and rebuilds the tree wholesale whenever the mapping changes.
//!
//! # Core Modules
//!
//! - [`session`] - the browsing session: store, controller, bundle export
//! - [`tree`] - flat path mapping -> hierarchical tree, display ordering
//! - [`nav`] - expanded-directory set and file selection
//! - [`client`] - HTTP transport against the generation service
//! - [`content`] - fenced-block normalization and display hints
//!
//! # Supporting Modules
//!
//! - [`cli`] - the `genx` command-line interface
//! - [`config`] - global configuration (`~/.genx/config.toml`)
//! - [`core`] - shared types and the error taxonomy
//! - [`constants`] - defaults (freshness window, endpoints, timeouts)
//!
//! # Example
//!
//! ```rust,no_run
//! use genx_cli::client::HttpApi;
//! use genx_cli::session::BrowserSession;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let api = HttpApi::new("http://127.0.0.1:8000", Duration::from_secs(30))?;
//! let mut session = BrowserSession::new(api, chrono::Duration::seconds(5));
//! session.activate().await?;
//!
//! if let Some(path) = session.selected() {
//!     println!("showing {path}");
//! }
//! for child in session.tree().sorted_children() {
//!     println!("{}", child.name);
//! }
//! # Ok(())
//! # }
//! ```

// Core functionality
pub mod core;
pub mod nav;
pub mod session;
pub mod tree;

// Service integration
pub mod client;
pub mod content;

// Supporting modules
pub mod cli;
pub mod config;
pub mod constants;

// test_utils is available to unit tests and to the integration suite
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
