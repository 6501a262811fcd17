//! Integration tests for the invex binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("invex")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_unsupported_kind_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.docx");
    std::fs::write(&path, "not an invoice").unwrap();

    Command::cargo_bin("invex")
        .unwrap()
        .arg("process")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported file type: docx"));
}

#[test]
fn test_missing_input_is_reported() {
    Command::cargo_bin("invex")
        .unwrap()
        .arg("process")
        .arg("does-not-exist.pdf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_config_path_runs() {
    Command::cargo_bin("invex")
        .unwrap()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}

#[test]
fn test_batch_without_matches_fails() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = dir.path().join("*.pdf").display().to_string();

    Command::cargo_bin("invex")
        .unwrap()
        .arg("batch")
        .arg(&pattern)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}
