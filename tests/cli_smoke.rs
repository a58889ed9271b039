#![allow(clippy::unwrap_used)]
//! CLI smoke tests: the binary starts, parses its arguments and refuses to
//! run without a usable config.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn teletrans() -> Command {
    Command::cargo_bin("teletrans").unwrap()
}

#[test]
fn test_help_displays_usage() {
    teletrans()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Translates your own outgoing chat messages in place",
        ))
        .stdout(predicate::str::contains("[WORKSPACE]"));
}

#[test]
fn test_version_displays_version() {
    teletrans()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_config_exits_with_config_code() {
    let workspace = TempDir::new().unwrap();

    teletrans()
        .arg(workspace.path())
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_malformed_config_exits_with_config_code() {
    let workspace = TempDir::new().unwrap();
    std::fs::write(workspace.path().join("config.json"), "{ not json").unwrap();

    teletrans()
        .arg(workspace.path())
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_startup_writes_log_into_workspace() {
    let workspace = TempDir::new().unwrap();

    teletrans().arg(workspace.path()).assert().failure();

    let log = std::fs::read_to_string(workspace.path().join("log.txt")).unwrap();
    assert!(log.contains("Failed to read config file"));
}
