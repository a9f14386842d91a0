//! Navigation state for the artifact tree: which directories are expanded
//! and which file is selected.
//!
//! The state is a plain owned object with `&mut` mutators - one browsing
//! session owns exactly one [`NavigationState`] and is its only writer.
//! Expansion is modeled as set membership (absence means collapsed).
//!
//! Invariant: immediately after [`NavigationState::select_file`], every
//! ancestor directory of the selected path is expanded - selection implies
//! visibility. Expansion driven by selection is monotonic; only the explicit
//! [`NavigationState::toggle`] and [`NavigationState::collapse_all`]
//! operations remove entries.

use std::collections::HashSet;

use crate::tree::TreeNode;

/// Expanded-directory set plus the current file selection.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    expanded: HashSet<String>,
    selected: Option<String>,
}

impl NavigationState {
    /// Fresh state: nothing expanded, nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected artifact path, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Whether `directory_path` is currently expanded.
    pub fn is_expanded(&self, directory_path: &str) -> bool {
        self.expanded.contains(directory_path)
    }

    /// The full set of expanded directory paths.
    pub fn expanded(&self) -> &HashSet<String> {
        &self.expanded
    }

    /// Select `path` and expand every ancestor directory on the way down to
    /// it. Existing expansions are never removed here.
    pub fn select_file(&mut self, path: &str) {
        self.selected = Some(path.to_string());
        self.expanded.extend(ancestor_directories(path));
    }

    /// Drop the selection. Expansion state is left as-is.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Flip the expansion of a single directory.
    pub fn toggle(&mut self, directory_path: &str) {
        if !self.expanded.remove(directory_path) {
            self.expanded.insert(directory_path.to_string());
        }
    }

    /// Expand every directory in `tree`.
    pub fn expand_all(&mut self, tree: &TreeNode) {
        tree.for_each_directory(&mut |dir| {
            self.expanded.insert(dir.full_path.clone());
        });
    }

    /// Collapse everything. The selection is deliberately left untouched,
    /// so a selected file's folder may become invisible until the user
    /// navigates again.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}

/// Every ancestor directory path of `path`: each prefix of its non-empty
/// segments short of the last, joined with `/`. Segment handling matches
/// the tree builder, so the returned paths line up with directory
/// `full_path`s even for inputs with separator noise.
pub fn ancestor_directories(path: &str) -> Vec<String> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut out = Vec::new();
    let mut prefix = String::new();
    for segment in segments.iter().take(segments.len().saturating_sub(1)) {
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(segment);
        out.push(prefix.clone());
    }
    out
}
