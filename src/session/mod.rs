//! The browsing session: orchestration of fetch, tree rebuild and
//! navigation.
//!
//! [`BrowserSession`] is the explicitly constructed session object - created
//! when the artifact browsing view mounts, dropped when it unmounts, and
//! passed by reference to whatever presents it. It owns the three pieces of
//! state ([`ArtifactStore`], the materialized tree, [`NavigationState`])
//! and is their only writer.
//!
//! Control flow: `activate` runs the initial non-forced fetch; `refresh` is
//! the external "artifacts changed" signal and forces one. After any applied
//! fetch the tree is rebuilt wholesale from the flat mapping and the
//! selection repaired, so the display is never stuck on an artifact that no
//! longer exists.

pub mod store;

pub use store::{ArtifactStore, BundleArchive, FetchOutcome};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::client::GenerationApi;
use crate::content::display_hint;
use crate::core::{ArtifactSet, GenxError};
use crate::nav::NavigationState;
use crate::tree::{self, TreeNode};

/// One artifact-browsing session over a generation service.
pub struct BrowserSession<A> {
    store: ArtifactStore<A>,
    tree: TreeNode,
    nav: NavigationState,
}

impl<A: GenerationApi> BrowserSession<A> {
    /// Create a dormant session. No request is issued until
    /// [`BrowserSession::activate`].
    pub fn new(api: A, freshness_window: chrono::Duration) -> Self {
        Self {
            store: ArtifactStore::new(api, freshness_window),
            tree: tree::build(&ArtifactSet::new()),
            nav: NavigationState::new(),
        }
    }

    /// First activation: fetch the artifact set (throttled if something
    /// else fetched moments ago), rebuild the tree and pick an initial
    /// selection.
    pub async fn activate(&mut self) -> Result<(), GenxError> {
        self.sync(false).await
    }

    /// External "artifacts changed" signal (a new generation run
    /// completed, or the user hit refresh): force a fetch past the
    /// freshness window.
    pub async fn refresh(&mut self) -> Result<(), GenxError> {
        self.sync(true).await
    }

    async fn sync(&mut self, force: bool) -> Result<(), GenxError> {
        match self.store.fetch(force).await {
            Ok(FetchOutcome::Updated) => {
                self.rebuild();
                Ok(())
            }
            Ok(FetchOutcome::Throttled | FetchOutcome::Stale) => Ok(()),
            Err(err) => {
                // The set was cleared; degrade the view to the empty state.
                self.rebuild();
                Err(err)
            }
        }
    }

    /// Rebuild the tree from the current mapping and repair the selection:
    /// a selection that is gone (or was never made) moves to the first file
    /// in display order, or to none for an empty set.
    fn rebuild(&mut self) {
        self.tree = tree::build(self.store.artifacts());

        let selection_valid = self
            .nav
            .selected()
            .is_some_and(|path| self.store.contains(path));
        if !selection_valid {
            match self.tree.first_file() {
                Some(file) => {
                    let path = file.full_path.clone();
                    debug!("selection moved to {path}");
                    self.nav.select_file(&path);
                }
                None => {
                    debug!("artifact set empty, selection cleared");
                    self.nav.clear_selection();
                }
            }
        }
        info!("tree rebuilt: {} files", self.tree.file_count());
    }

    /// Select an artifact by path, expanding its ancestors. Returns `false`
    /// (and changes nothing) when the path is not in the current set.
    pub fn select_file(&mut self, path: &str) -> bool {
        if !self.store.contains(path) {
            return false;
        }
        self.nav.select_file(path);
        true
    }

    /// Flip the expansion of a directory.
    pub fn toggle(&mut self, directory_path: &str) {
        self.nav.toggle(directory_path);
    }

    /// Expand every directory of the current tree.
    pub fn expand_all(&mut self) {
        self.nav.expand_all(&self.tree);
    }

    /// Collapse every directory, leaving the selection untouched.
    pub fn collapse_all(&mut self) {
        self.nav.collapse_all();
    }

    /// The current artifact tree.
    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    /// The current flat mapping.
    pub fn artifacts(&self) -> &ArtifactSet {
        self.store.artifacts()
    }

    /// Number of artifacts in the current set.
    pub fn artifact_count(&self) -> usize {
        self.store.len()
    }

    /// The selected artifact path, if any.
    pub fn selected(&self) -> Option<&str> {
        self.nav.selected()
    }

    /// The expanded-directory set.
    pub fn expanded(&self) -> &HashSet<String> {
        self.nav.expanded()
    }

    /// Whether a directory is expanded.
    pub fn is_expanded(&self, directory_path: &str) -> bool {
        self.nav.is_expanded(directory_path)
    }

    /// Content of the selected artifact, if any.
    pub fn selected_content(&self) -> Option<&str> {
        self.nav.selected().and_then(|path| self.store.content(path))
    }

    /// Display hint for the selected artifact, if any.
    pub fn selected_hint(&self) -> Option<&'static str> {
        self.nav.selected().map(display_hint)
    }

    /// Content of an arbitrary artifact.
    pub fn content(&self, path: &str) -> Option<&str> {
        self.store.content(path)
    }

    /// Completion time of the last applied successful fetch.
    pub fn last_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.store.fetched_at()
    }

    /// Download the packaged archive and write it into `dir` under the
    /// server-provided (or fallback) filename. Returns the written path.
    /// The artifact set is untouched either way.
    pub async fn save_bundle(&self, dir: &Path) -> Result<PathBuf, GenxError> {
        let archive = self.store.export_bundle().await?;
        let path = dir.join(&archive.filename);
        tokio::fs::write(&path, &archive.bytes).await?;
        info!("bundle saved to {}", path.display());
        Ok(path)
    }
}
