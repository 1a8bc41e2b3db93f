//! Argument handling and exit codes of the `labelsync` binary.
//!
//! Nothing here reaches GitHub: either the run fails before the first request,
//! or the API root points at a closed local port.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const CLOSED_PORT: &str = "http://127.0.0.1:9";

fn labelsync_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("labelsync"));
    cmd.env_remove("GITHUB_OAUTH_TOKEN")
        .env_remove("GITHUB_API_URL")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_every_option() {
    labelsync_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            contains("--exclude")
                .and(contains("--token"))
                .and(contains("GITHUB_OAUTH_TOKEN"))
                .and(contains("--yes"))
                .and(contains("--file-name"))
                .and(contains("--api-url"))
                .and(contains("--json")),
        );
}

#[test]
fn targets_are_required() {
    labelsync_cmd()
        .arg("-y")
        .assert()
        .failure()
        .stderr(contains("ACCOUNT[/REPOSITORY]"));
}

#[test]
fn malformed_target_is_rejected() {
    labelsync_cmd()
        .args(["acme/api/extra", "--api-url", CLOSED_PORT])
        .assert()
        .failure()
        .stderr(contains("invalid target 'acme/api/extra'"));
}

#[test]
fn invalid_reference_file_fails_before_any_request() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("labels.csv");
    fs::write(&file, "bug,ee0701\ndefect,EE0701\n").expect("write reference list");

    labelsync_cmd()
        .args(["acme", "-y", "--api-url", CLOSED_PORT, "-f"])
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(
            contains("failed to load reference labels")
                .and(contains("labels 'bug' and 'defect' share color")),
        );
}

#[test]
fn missing_reference_file_is_an_error() {
    let dir = TempDir::new().expect("tempdir");

    labelsync_cmd()
        .args(["acme", "--api-url", CLOSED_PORT, "-f"])
        .arg(dir.path().join("absent.csv"))
        .assert()
        .code(1)
        .stderr(contains("failed to read reference list"));
}

#[test]
fn unreachable_api_exits_with_error_and_empty_summary() {
    labelsync_cmd()
        .args(["acme", "-y", "--api-url", CLOSED_PORT])
        .assert()
        .code(1)
        .stdout(contains("No repositories processed."))
        .stderr(contains("synchronization failed").and(contains("127.0.0.1:9/orgs/acme")));
}

#[test]
fn json_summary_is_a_single_document() {
    let output = labelsync_cmd()
        .args(["acme", "-y", "--json", "--api-url", CLOSED_PORT])
        .output()
        .expect("run labelsync");

    assert_eq!(output.status.code(), Some(1));
    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(summary["repositories"], serde_json::json!([]));
    assert_eq!(summary["totals"]["created"], 0);
}
