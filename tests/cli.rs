// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Tests for the markdown2lua binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("markdown2lua").unwrap()
}

#[test]
fn converts_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("1.0.md");
    let output = dir.path().join("changelog.lua");
    fs::write(&input, "# Title\n\nSome text.\n").unwrap();

    cmd()
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Wrote").and(predicate::str::contains("(3 lines)")))
        .stderr(predicate::str::contains("warning").not());

    let lua = fs::read_to_string(&output).unwrap();
    assert!(lua.contains("    version = 1.0,\n"));
    assert!(lua.contains("        \"Some text.\"\n"));
}

#[test]
fn warns_about_unquotable_version() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("2.3.1.md");
    let output = dir.path().join("changelog.lua");
    fs::write(&input, "text\n").unwrap();

    cmd()
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: version `2.3.1`"));

    let lua = fs::read_to_string(&output).unwrap();
    assert!(lua.contains("    version = 2.3.1,\n"));
}

#[test]
fn no_arguments_prints_help() {
    cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: markdown2lua <INPUT> <OUTPUT>"));
}

#[test]
fn help_flag_prints_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("<OUTPUT>"));
}

#[test]
fn version_flag_prints_version() {
    cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("markdown2lua "));
}

#[test]
fn missing_output_argument_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("1.md");
    fs::write(&input, "text\n").unwrap();

    cmd()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("<OUTPUT>"));
}

#[test]
fn extra_argument_fails() {
    cmd()
        .args(["a.md", "b.lua", "c.lua"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("c.lua"));
}

#[test]
fn unknown_option_fails() {
    cmd()
        .args(["--width", "80", "a.md", "b.lua"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--width"));
}

#[test]
fn missing_input_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("missing.md");
    let output = dir.path().join("out.lua");

    cmd()
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.md"));

    assert!(!output.exists());
}
