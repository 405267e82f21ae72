//! End-to-end tests for CLI exit codes.
//!
//! - Exit code 0: Success
//! - Exit code 1: Any failure while mirroring
//! - Exit code 2: Invalid command-line usage (handled by clap)

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Exit code 0 is returned for --help.
#[test]
fn test_exit_code_help() {
    let mut cmd = cargo_bin_cmd!("hook-mirror");

    cmd.arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("--package-name"))
        .stdout(predicate::str::contains("--types-or"));
}

/// Exit code 0 is returned for --version.
#[test]
fn test_exit_code_version() {
    let mut cmd = cargo_bin_cmd!("hook-mirror");

    cmd.arg("--version")
        .assert()
        .code(0)
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Exit code 2 is returned when required arguments are missing.
#[test]
fn test_exit_code_missing_required() {
    let mut cmd = cargo_bin_cmd!("hook-mirror");

    cmd.arg("repo")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--language"));
}

/// Exit code 2 is returned when no match selector is given.
#[test]
fn test_exit_code_missing_selector() {
    let mut cmd = cargo_bin_cmd!("hook-mirror");

    cmd.args(["repo", "--language", "python", "--package-name", "yapf"])
        .assert()
        .code(2);
}

/// Exit code 2 is returned for mutually exclusive match selectors.
#[test]
fn test_exit_code_conflicting_selectors() {
    let mut cmd = cargo_bin_cmd!("hook-mirror");

    cmd.args([
        "repo",
        "--language",
        "python",
        "--package-name",
        "yapf",
        "--files-regex",
        r"\.py$",
        "--types",
        "python",
    ])
    .assert()
    .code(2)
    .stderr(predicate::str::contains("cannot be used with"));
}

/// Exit code 2 is returned for an unregistered ecosystem.
#[test]
fn test_exit_code_unknown_language() {
    let mut cmd = cargo_bin_cmd!("hook-mirror");

    cmd.args([
        "repo",
        "--language",
        "cobol",
        "--package-name",
        "x",
        "--types",
        "text",
    ])
    .assert()
    .code(2)
    .stderr(predicate::str::contains("possible values"));
}
