//! Core types and error handling for genx.
//!
//! This module holds the small set of types shared across the crate:
//!
//! - [`ArtifactSet`] - the flat mapping of generated-file paths to content
//! - [`error`] - the [`GenxError`] taxonomy and user-facing error formatting
//!
//! Everything else (tree building, navigation, the session) consumes these
//! types but lives in its own module.

pub mod error;

pub use error::{ErrorContext, GenxError, user_friendly_error};

use std::collections::BTreeMap;

/// The complete flat mapping of artifact paths to content for one
/// generation run.
///
/// Keys are `/`-separated artifact paths as produced by the generation
/// service; values are the (normalized) file contents. The map is ordered so
/// that iteration - and therefore tree building - is deterministic without
/// extra sorting. The set is replaced wholesale on every successful fetch
/// and cleared to empty on fetch failure; it is never patched incrementally.
pub type ArtifactSet = BTreeMap<String, String>;
