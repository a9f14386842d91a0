//! Binary-level smoke tests for the `genx` CLI.
//!
//! Network-dependent commands are only exercised on their error paths
//! (pointing at a port nothing listens on); happy-path coverage lives in
//! the session tests over the in-memory transport.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A server URL that refuses connections immediately.
const DEAD_SERVER: &str = "http://127.0.0.1:9";

fn genx() -> Command {
    Command::cargo_bin("genx").expect("genx binary builds")
}

#[test]
fn help_lists_all_commands() {
    genx()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("tree"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn list_against_dead_server_fails_with_hint() {
    let config_dir = TempDir::new().unwrap();
    genx()
        .args(["list", "--server", DEAD_SERVER, "--quiet"])
        .env("GENX_CONFIG_PATH", config_dir.path().join("config.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("generated files"));
}

#[test]
fn tree_rejects_unknown_format_before_touching_network() {
    genx()
        .args(["tree", "--format", "yaml", "--server", DEAD_SERVER])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn config_path_honors_env_override() {
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("config.toml");
    genx()
        .args(["config", "path"])
        .env("GENX_CONFIG_PATH", &config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains(config_path.to_str().unwrap()));
}

#[test]
fn config_set_url_round_trips_through_show() {
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("config.toml");
    let config_arg = config_path.to_str().unwrap();

    genx()
        .args(["config", "set-url", "http://gen.example.com:9000"])
        .args(["--config", config_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://gen.example.com:9000"));

    genx()
        .args(["config", "show", "--config", config_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://gen.example.com:9000"))
        .stdout(predicate::str::contains("freshness_window_secs"));
}

#[test]
fn config_show_reports_defaults_without_a_file() {
    let config_dir = TempDir::new().unwrap();
    genx()
        .args(["config", "show"])
        .env("GENX_CONFIG_PATH", config_dir.path().join("missing.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("http://127.0.0.1:8000"));
}
