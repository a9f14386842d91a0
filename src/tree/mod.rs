//! Hierarchical tree materialization from the flat artifact mapping.
//!
//! [`build`] is a pure function: it takes the flat `path -> content` mapping
//! and reconstructs a directory hierarchy from the path strings. It has no
//! side effects and is fully re-derivable - the session rebuilds the tree
//! wholesale on every artifact-set change instead of patching it, which
//! rules out drift between the mapping and the hierarchy.
//!
//! Child ordering within a directory is NOT part of the build contract.
//! [`TreeNode::sorted_children`] applies the presentation ordering
//! (directories before files, case-sensitive name order) and is recomputed
//! on every call rather than cached on the node.

use std::collections::BTreeMap;

use tracing::warn;

use crate::core::ArtifactSet;

/// A node in the materialized artifact tree: either a directory or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// The final path segment ("App.java", "src"); empty for the root.
    pub name: String,
    /// Full path joined from the segments walked from the root; empty for
    /// the synthetic root. For file nodes this is the (normalized) artifact
    /// path and keys back into the [`ArtifactSet`].
    pub full_path: String,
    /// True only for leaf terminations of an artifact path.
    pub is_file: bool,
    /// Child nodes, unique by `name`. Order is an implementation detail;
    /// use [`TreeNode::sorted_children`] for display.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(name: String, full_path: String, is_file: bool) -> Self {
        Self {
            name,
            full_path,
            is_file,
            children: Vec::new(),
        }
    }

    /// Whether this node is the synthetic root.
    pub fn is_root(&self) -> bool {
        self.full_path.is_empty()
    }

    /// Children in display order: directories first, then files, each group
    /// ordered by case-sensitive name comparison.
    pub fn sorted_children(&self) -> Vec<&TreeNode> {
        let mut out: Vec<&TreeNode> = self.children.iter().collect();
        out.sort_by(|a, b| a.is_file.cmp(&b.is_file).then_with(|| a.name.cmp(&b.name)));
        out
    }

    /// The first file node encountered in a display-order depth-first walk,
    /// i.e. the topmost file an explorer view would render. `None` for an
    /// empty tree.
    pub fn first_file(&self) -> Option<&TreeNode> {
        if self.is_file {
            return Some(self);
        }
        self.sorted_children()
            .into_iter()
            .find_map(|child| child.first_file())
    }

    /// Visit every directory node below (and excluding) the root.
    pub fn for_each_directory<'a>(&'a self, visit: &mut impl FnMut(&'a TreeNode)) {
        for child in &self.children {
            if !child.is_file {
                visit(child);
                child.for_each_directory(visit);
            }
        }
    }

    /// Count of reachable file nodes.
    pub fn file_count(&self) -> usize {
        if self.is_file {
            1
        } else {
            self.children.iter().map(TreeNode::file_count).sum()
        }
    }
}

/// Canonical form of an artifact path: its non-empty segments joined with
/// single `/` separators, which is exactly the `full_path` the built tree
/// records for the corresponding file node. `None` when nothing is left
/// after discarding empty segments.
pub fn canonical_path(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// Intermediate node keyed by segment name while paths are being walked.
#[derive(Default)]
struct RawNode {
    is_file: bool,
    children: BTreeMap<String, RawNode>,
}

/// Build the artifact tree from the flat mapping.
///
/// Each path is split on `/` with empty segments discarded, so leading,
/// trailing and doubled separators are tolerated. Interior segments become
/// directory nodes; the last segment becomes a file node. Full paths are
/// recorded by joining the walked segment chain, not by copying the map key,
/// so they are robust to that normalization.
///
/// Conflicts are resolved with a directory-wins policy:
/// - a file node that another path needs as an intermediate segment becomes
///   a directory and loses its file association;
/// - a path terminating at an existing directory node is skipped.
///
/// Both cases are logged and never raised; likewise a path that normalizes
/// to zero segments is skipped. Empty input yields a root with no children.
/// Because the input map iterates in sorted key order, two builds from the
/// same mapping produce identical trees.
pub fn build(artifacts: &ArtifactSet) -> TreeNode {
    let mut root = RawNode::default();

    for path in artifacts.keys() {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((last, dirs)) = segments.split_last() else {
            warn!("skipping artifact path with no usable segments: {path:?}");
            continue;
        };

        let mut node = &mut root;
        for segment in dirs {
            let child = node.children.entry((*segment).to_string()).or_default();
            if child.is_file {
                warn!("artifact path {path:?} turns file segment {segment:?} into a directory");
                child.is_file = false;
            }
            node = child;
        }

        let leaf = node.children.entry((*last).to_string()).or_default();
        if leaf.children.is_empty() {
            leaf.is_file = true;
        } else {
            warn!("skipping artifact path {path:?}: a directory with that path already exists");
        }
    }

    materialize(String::new(), String::new(), &root)
}

fn materialize(name: String, full_path: String, raw: &RawNode) -> TreeNode {
    let children = raw
        .children
        .iter()
        .map(|(child_name, child_raw)| {
            let child_path = if full_path.is_empty() {
                child_name.clone()
            } else {
                format!("{full_path}/{child_name}")
            };
            materialize(child_name.clone(), child_path, child_raw)
        })
        .collect();
    let mut node = TreeNode::new(name, full_path, raw.is_file);
    node.children = children;
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact_set(paths: &[&str]) -> ArtifactSet {
        paths
            .iter()
            .map(|p| ((*p).to_string(), String::new()))
            .collect()
    }

    fn file_paths(node: &TreeNode, out: &mut Vec<String>) {
        if node.is_file {
            out.push(node.full_path.clone());
        }
        for child in &node.children {
            file_paths(child, out);
        }
    }

    #[test]
    fn test_empty_set_yields_bare_root() {
        let root = build(&ArtifactSet::new());
        assert!(root.is_root());
        assert!(!root.is_file);
        assert!(root.children.is_empty());
        assert_eq!(root.file_count(), 0);
    }

    #[test]
    fn test_every_path_round_trips_to_one_file_node() {
        let set = artifact_set(&[
            "src/main/java/App.java",
            "src/main/resources/application.properties",
            "pom.xml",
        ]);
        let root = build(&set);

        let mut files = Vec::new();
        file_paths(&root, &mut files);
        files.sort();
        let mut expected: Vec<String> = set.keys().cloned().collect();
        expected.sort();
        assert_eq!(files, expected);
    }

    #[test]
    fn test_two_top_level_entries() {
        let root = build(&artifact_set(&["src/App.java", "README.md"]));
        assert_eq!(root.children.len(), 2);

        let ordered = root.sorted_children();
        assert_eq!(ordered[0].name, "src");
        assert!(!ordered[0].is_file);
        assert_eq!(ordered[1].name, "README.md");
        assert!(ordered[1].is_file);

        let src = ordered[0];
        assert_eq!(src.children.len(), 1);
        assert_eq!(src.children[0].full_path, "src/App.java");
        assert!(src.children[0].is_file);
    }

    #[test]
    fn test_separator_noise_is_normalized() {
        let root = build(&artifact_set(&["//src//lib.rs/", "/top.txt"]));
        let mut files = Vec::new();
        file_paths(&root, &mut files);
        files.sort();
        assert_eq!(files, vec!["src/lib.rs", "top.txt"]);
    }

    #[test]
    fn test_degenerate_paths_are_skipped() {
        let root = build(&artifact_set(&["///", "ok.txt"]));
        assert_eq!(root.file_count(), 1);
        assert_eq!(root.children[0].full_path, "ok.txt");
    }

    #[test]
    fn test_canonical_path() {
        assert_eq!(canonical_path("a/b.txt"), Some("a/b.txt".to_string()));
        assert_eq!(canonical_path("//a//b.txt/"), Some("a/b.txt".to_string()));
        assert_eq!(canonical_path("///"), None);
        assert_eq!(canonical_path(""), None);
    }

    #[test]
    fn test_builds_are_deterministic() {
        let set = artifact_set(&["b/x.rs", "a/y.rs", "a/b/z.rs", "top.md"]);
        let first = build(&set);
        let second = build(&set);
        assert_eq!(first, second);
    }

    #[test]
    fn test_directory_wins_when_file_needs_children() {
        // "src" is seen first as a file, then as an ancestor of another path.
        let root = build(&artifact_set(&["src", "src/App.java"]));
        let src = root
            .children
            .iter()
            .find(|c| c.name == "src")
            .expect("src node");
        assert!(!src.is_file);
        assert_eq!(src.children.len(), 1);
        assert_eq!(src.children[0].full_path, "src/App.java");
        assert_eq!(root.file_count(), 1);
    }

    #[test]
    fn test_directory_wins_when_path_terminates_at_directory() {
        // "A/!.txt" sorts before "A//" and creates directory "A" first; the
        // second path then terminates at that directory and is dropped.
        let root = build(&artifact_set(&["A/!.txt", "A//"]));
        assert_eq!(root.file_count(), 1);
        let a = root.children.iter().find(|c| c.name == "A").unwrap();
        assert!(!a.is_file);
        assert_eq!(a.children[0].full_path, "A/!.txt");
    }

    #[test]
    fn test_duplicate_after_normalization_collapses() {
        let root = build(&artifact_set(&["a//b.txt", "a/b.txt"]));
        assert_eq!(root.file_count(), 1);
        let a = &root.children[0];
        assert_eq!(a.children[0].full_path, "a/b.txt");
    }

    #[test]
    fn test_sorted_children_orders_directories_first_then_by_name() {
        let root = build(&artifact_set(&[
            "zeta.txt",
            "alpha.txt",
            "beta/inner.txt",
            "delta/inner.txt",
        ]));
        let names: Vec<&str> = root
            .sorted_children()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["beta", "delta", "alpha.txt", "zeta.txt"]);
    }

    #[test]
    fn test_ordering_is_case_sensitive() {
        let root = build(&artifact_set(&["Zed.txt", "apple.txt"]));
        let names: Vec<&str> = root
            .sorted_children()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        // Uppercase sorts before lowercase in a byte-wise comparison.
        assert_eq!(names, vec!["Zed.txt", "apple.txt"]);
    }

    #[test]
    fn test_first_file_follows_display_order() {
        let root = build(&artifact_set(&["src/App.java", "README.md"]));
        assert_eq!(root.first_file().unwrap().full_path, "src/App.java");

        let root = build(&artifact_set(&["b.txt", "a.txt"]));
        assert_eq!(root.first_file().unwrap().full_path, "a.txt");

        assert!(build(&ArtifactSet::new()).first_file().is_none());
    }

    #[test]
    fn test_for_each_directory_visits_all_directories() {
        let root = build(&artifact_set(&["a/b/c.txt", "a/d.txt", "e/f.txt"]));
        let mut dirs = Vec::new();
        root.for_each_directory(&mut |d| dirs.push(d.full_path.clone()));
        dirs.sort();
        assert_eq!(dirs, vec!["a", "a/b", "e"]);
    }
}
