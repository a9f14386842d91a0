//! Error handling for genx.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`GenxError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable
//!    suggestions for CLI users
//!
//! Nothing in this subsystem is fatal to the application: fetch failures
//! degrade to an empty artifact set with a retry affordance, export failures
//! leave all state untouched, and malformed paths are skipped during tree
//! building rather than raised.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for genx operations.
///
/// Each variant represents a specific failure mode with enough context to
/// produce an actionable message. Common library errors are converted
/// automatically via `#[from]`.
#[derive(Error, Debug)]
pub enum GenxError {
    /// Fetching the generated-file mapping failed (network error or
    /// non-success status). The artifact set has been reset to empty.
    #[error("failed to fetch generated files: {reason}")]
    FetchFailed {
        /// Human-readable description of the underlying failure.
        reason: String,
    },

    /// Downloading the packaged artifact bundle failed. No state was
    /// mutated.
    #[error("failed to export artifact bundle: {reason}")]
    ExportFailed {
        /// Human-readable description of the underlying failure.
        reason: String,
    },

    /// The generation service answered with a non-success status code.
    #[error("server returned HTTP {status} for {endpoint}")]
    ApiStatus {
        /// Endpoint path that was requested.
        endpoint: String,
        /// HTTP status code of the response.
        status: u16,
    },

    /// The global configuration file could not be loaded or saved.
    #[error("configuration error: {reason}")]
    ConfigError {
        /// Description of what went wrong.
        reason: String,
    },

    /// IO error wrapper for [`std::io::Error`].
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error from [`reqwest`].
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error from [`serde_json`].
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error from [`toml`].
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error from [`toml`].
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Wrapper that adds user-facing context to an error.
///
/// Holds the underlying error together with an optional suggestion and
/// optional details, and renders them with colors for terminal display.
///
/// # Examples
///
/// ```rust,no_run
/// use genx_cli::core::{ErrorContext, GenxError};
///
/// let context = ErrorContext::new(GenxError::FetchFailed {
///     reason: "connection refused".to_string(),
/// })
/// .with_suggestion("Check that the generation service is running");
/// context.display();
/// ```
pub struct ErrorContext {
    /// The underlying error.
    pub error: anyhow::Error,
    /// An actionable suggestion shown below the error message.
    pub suggestion: Option<String>,
    /// Additional details shown below the suggestion.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new context from any error.
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion line.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach a details line.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the formatted error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{} {}", "error:".red().bold(), self.error);
        if let Some(details) = &self.details {
            eprintln!("  {} {}", "details:".yellow(), details);
        }
        if let Some(suggestion) = &self.suggestion {
            eprintln!("  {} {}", "hint:".cyan(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\n  details: {details}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  hint: {suggestion}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorContext")
            .field("error", &self.error)
            .field("suggestion", &self.suggestion)
            .field("details", &self.details)
            .finish()
    }
}

/// Convert any error into an [`ErrorContext`] with contextual suggestions.
///
/// Known [`GenxError`] variants get targeted hints (which server to check,
/// which command fixes the configuration); everything else is passed through
/// unchanged so the anyhow context chain still reads well.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let suggestion = match error.downcast_ref::<GenxError>() {
        Some(GenxError::FetchFailed { .. }) => Some(
            "Check that the generation service is running and reachable, then retry".to_string(),
        ),
        Some(GenxError::ExportFailed { .. }) => {
            Some("The artifact set is unchanged; retry the export once the service recovers".to_string())
        }
        Some(GenxError::ApiStatus { endpoint, .. }) => Some(format!(
            "The service rejected {endpoint}; a new generation run may not have completed yet"
        )),
        Some(GenxError::ConfigError { .. }) => {
            Some("Run 'genx config show' to inspect the configuration, or 'genx config set-url <URL>' to fix the server address".to_string())
        }
        Some(GenxError::Http(_)) => {
            Some("Verify the server URL with 'genx config show' and check your network connection".to_string())
        }
        _ => None,
    };

    let mut context = ErrorContext::new(error);
    context.suggestion = suggestion;
    context
}
