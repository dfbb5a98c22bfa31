//! Integration tests for top-level CLI behavior.

use std::process::Command;

fn run_linkward(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_linkward");
    Command::new(bin)
        .args(args)
        .env_remove("LINKWARDEN_RECORD")
        .env_remove("LINKWARDEN_POLL_INTERVAL_MS")
        .env_remove("LINKWARDEN_POLL_MAX_ATTEMPTS")
        .output()
        .expect("failed to run linkward binary")
}

#[test]
fn help_lists_subcommands() {
    let output = run_linkward(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    for name in ["watch", "edit", "search", "delete-account", "rss-delete"] {
        assert!(stdout.contains(name), "missing {name} in help");
    }
}

#[test]
fn edit_help_shows_field_flags() {
    let output = run_linkward(&["edit", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--name"));
    assert!(stdout.contains("--collection"));
    assert!(stdout.contains("--tag"));
}

#[test]
fn search_rejects_unknown_sort() {
    let output = run_linkward(&["search", "rust", "--sort", "newest"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("name-az"), "possible values listed: {stderr}");
}

#[test]
fn unknown_subcommand_fails() {
    let output = run_linkward(&["archive"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("archive"));
}

#[test]
fn watch_requires_numeric_id() {
    let output = run_linkward(&["watch", "abc"]);
    assert!(!output.status.success());
}

#[test]
fn zero_poll_interval_is_rejected() {
    let output = run_linkward(&["--poll-interval-ms", "0", "watch", "1"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("poll interval"));
}

#[test]
fn delete_account_without_password_fails_before_any_request() {
    let output = run_linkward(&["--url", "http://127.0.0.1:9", "delete-account", "1"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Please fill out all the required fields."));
}
