//! End-to-end browsing-session flows over the scripted in-memory transport.

use std::collections::BTreeMap;

use genx_cli::session::BrowserSession;
use genx_cli::test_utils::{FakeApi, init_test_logging};

fn feed(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(p, c)| ((*p).to_string(), (*c).to_string()))
        .collect()
}

fn session_with(api: FakeApi) -> BrowserSession<FakeApi> {
    init_test_logging();
    BrowserSession::new(api, chrono::Duration::seconds(60))
}

#[tokio::test]
async fn activation_builds_tree_and_selects_topmost_file() {
    let api = FakeApi::new().with_files(feed(&[
        ("src/App.java", "class App {}"),
        ("README.md", "hello"),
    ]));
    let mut session = session_with(api);
    session.activate().await.unwrap();

    // Tree shape: two top-level children, src/ before README.md in display
    // order, with the full path recorded on the nested file.
    let root = session.tree();
    assert_eq!(root.children.len(), 2);
    let ordered = root.sorted_children();
    assert_eq!(ordered[0].name, "src");
    assert!(!ordered[0].is_file);
    assert_eq!(ordered[0].children[0].full_path, "src/App.java");
    assert_eq!(ordered[1].name, "README.md");
    assert!(ordered[1].is_file);

    // The topmost file in display order becomes the initial selection, and
    // its folder is expanded so the selection is visible.
    assert_eq!(session.selected(), Some("src/App.java"));
    assert!(session.is_expanded("src"));
    assert_eq!(session.selected_content(), Some("class App {}"));
}

#[tokio::test]
async fn fenced_content_is_normalized_before_display() {
    let api = FakeApi::new().with_files(feed(&[
        ("src/A.java", "```java\nclass A{}\n```"),
        ("plain.txt", "no fences here"),
    ]));
    let mut session = session_with(api);
    session.activate().await.unwrap();

    assert_eq!(session.content("src/A.java"), Some("class A{}"));
    assert_eq!(session.content("plain.txt"), Some("no fences here"));
}

#[tokio::test]
async fn repeated_activation_is_served_from_cache() {
    let api = FakeApi::new().with_files(feed(&[("a.txt", "1")]));
    let mut session = session_with(api);

    session.activate().await.unwrap();
    session.activate().await.unwrap();
    session.activate().await.unwrap();

    // One scripted response, three activations: the freshness window
    // absorbed the burst (the fake panics if a second request is issued).
    assert_eq!(session.artifact_count(), 1);
}

#[tokio::test]
async fn refresh_bypasses_the_freshness_window() {
    let api = FakeApi::new()
        .with_files(feed(&[("a.txt", "1")]))
        .with_files(feed(&[("b.txt", "2")]));
    let mut session = session_with(api);

    session.activate().await.unwrap();
    session.refresh().await.unwrap();

    assert!(session.content("b.txt").is_some());
    assert!(session.content("a.txt").is_none());
}

#[tokio::test]
async fn selection_survives_refresh_when_still_present() {
    let api = FakeApi::new()
        .with_files(feed(&[("keep.txt", "old"), ("other.txt", "x")]))
        .with_files(feed(&[("keep.txt", "new"), ("added.txt", "y")]));
    let mut session = session_with(api);
    session.activate().await.unwrap();
    assert!(session.select_file("keep.txt"));

    session.refresh().await.unwrap();
    assert_eq!(session.selected(), Some("keep.txt"));
    assert_eq!(session.selected_content(), Some("new"));
}

#[tokio::test]
async fn evicted_selection_is_repaired_and_expansion_follows() {
    let api = FakeApi::new()
        .with_files(feed(&[("old/file.txt", "x")]))
        .with_files(feed(&[("deep/nested/new.txt", "y"), ("z.txt", "top")]));
    let mut session = session_with(api);
    session.activate().await.unwrap();
    assert_eq!(session.selected(), Some("old/file.txt"));

    session.refresh().await.unwrap();
    assert_eq!(session.selected(), Some("deep/nested/new.txt"));
    assert!(session.is_expanded("deep"));
    assert!(session.is_expanded("deep/nested"));
}

#[tokio::test]
async fn failed_refresh_degrades_to_empty_view_and_recovers() {
    let api = FakeApi::new()
        .with_files(feed(&[("a.txt", "1")]))
        .with_files_error("service restarting")
        .with_files(feed(&[("back.txt", "again")]));
    let mut session = session_with(api);
    session.activate().await.unwrap();

    assert!(session.refresh().await.is_err());
    assert_eq!(session.artifact_count(), 0);
    assert!(session.selected().is_none());
    assert!(session.tree().children.is_empty());

    // Retry is user-initiated and not throttled after a failure.
    session.activate().await.unwrap();
    assert_eq!(session.selected(), Some("back.txt"));
}

#[tokio::test]
async fn expansion_state_accumulates_across_selections() {
    let api = FakeApi::new().with_files(feed(&[
        ("a/one.txt", "1"),
        ("b/two.txt", "2"),
        ("top.txt", "t"),
    ]));
    let mut session = session_with(api);
    session.activate().await.unwrap();

    session.select_file("a/one.txt");
    session.select_file("b/two.txt");
    assert!(session.is_expanded("a"));
    assert!(session.is_expanded("b"));

    session.toggle("a");
    assert!(!session.is_expanded("a"));

    session.collapse_all();
    assert!(session.expanded().is_empty());
    assert_eq!(session.selected(), Some("b/two.txt"));
}

#[tokio::test]
async fn bundle_export_writes_server_named_archive() {
    let api = FakeApi::new()
        .with_files(feed(&[("a.txt", "1")]))
        .with_bundle(Some("productmanagement.zip"), b"PK\x03\x04data".to_vec());
    let mut session = session_with(api);
    session.activate().await.unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    let written = session.save_bundle(dir.path()).await.unwrap();

    assert_eq!(
        written.file_name().unwrap().to_str().unwrap(),
        "productmanagement.zip"
    );
    assert_eq!(std::fs::read(&written).unwrap(), b"PK\x03\x04data");
    // Export never mutates the artifact set.
    assert_eq!(session.artifact_count(), 1);
}

#[tokio::test]
async fn bundle_export_falls_back_to_default_filename() {
    let api = FakeApi::new().with_bundle(None, b"PK".to_vec());
    let session = session_with(api);

    let dir = tempfile::TempDir::new().unwrap();
    let written = session.save_bundle(dir.path()).await.unwrap();
    assert_eq!(
        written.file_name().unwrap().to_str().unwrap(),
        "generated_package.zip"
    );
}
