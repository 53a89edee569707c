//! Binary-level CLI tests. These never invoke ffmpeg: they only exercise
//! argument handling and the fatal-error exit path.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn no_args_shows_usage_error() {
    Command::cargo_bin("revealcut")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_the_cli_surface() {
    Command::cargo_bin("revealcut")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--message"))
        .stdout(predicate::str::contains("--seed"))
        .stdout(predicate::str::contains("--simple"));
}

#[test]
fn nonexistent_inputs_fail_with_nonzero_exit() {
    // Fails either on tool discovery (bare environment) or on input
    // validation; both are fatal and must leave exit status non-zero.
    Command::cargo_bin("revealcut")
        .unwrap()
        .args(["/nonexistent/a.mp4", "/nonexistent/b.mp4"])
        .assert()
        .failure();
}

#[test]
fn invalid_seed_is_rejected() {
    Command::cargo_bin("revealcut")
        .unwrap()
        .args(["a.mp4", "b.mp4", "-s", "not-a-number"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
