//! CLI argument-handling tests.
//!
//! These never launch a browser: they exercise help output and the
//! configuration validation that runs before anything is spawned.

use assert_cmd::Command;
use predicates::prelude::*;

fn flowcheck() -> Command {
    let mut cmd = Command::cargo_bin("flowcheck").expect("binary built");
    cmd.env_remove("FLOWCHECK_BASE_URL")
        .env_remove("FLOWCHECK_EMAIL")
        .env_remove("FLOWCHECK_PASSWORD")
        .env_remove("FLOWCHECK_ADMIN_NAME");
    cmd
}

#[test]
fn help_lists_flow_flags() {
    flowcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--base-url"))
        .stdout(predicate::str::contains("--email"))
        .stdout(predicate::str::contains("--password"))
        .stdout(predicate::str::contains("--headed"))
        .stdout(predicate::str::contains("--timeout"));
}

#[test]
fn missing_credentials_is_a_usage_error() {
    flowcheck()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--email"));
}

#[test]
fn rejects_non_http_base_url() {
    flowcheck()
        .args([
            "--base-url",
            "ftp://example.com",
            "--email",
            "admin@example.com",
            "--password",
            "adminpassword",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
