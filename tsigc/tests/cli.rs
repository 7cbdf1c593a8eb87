//! CLI-level integration tests driving the compiled `tsigc` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn check_reports_ok_for_a_valid_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("ok.rbs");
    fs::write(&file, "FOO: Integer\n").unwrap();

    Command::cargo_bin("tsigc")
        .unwrap()
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
}

#[test]
fn check_exits_nonzero_for_a_syntax_error() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("bad.rbs");
    fs::write(&file, "class\n").unwrap();

    Command::cargo_bin("tsigc")
        .unwrap()
        .arg("check")
        .arg(&file)
        .assert()
        .failure();
}

#[test]
fn check_requires_at_least_one_file() {
    Command::cargo_bin("tsigc")
        .unwrap()
        .arg("check")
        .assert()
        .failure();
}

#[test]
fn dump_prints_the_parsed_declaration() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("sig.rbs");
    fs::write(&file, "type result[T] = T | nil\n").unwrap();

    Command::cargo_bin("tsigc")
        .unwrap()
        .arg("dump")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Alias"));
}

#[test]
fn type_prints_the_parsed_node() {
    Command::cargo_bin("tsigc")
        .unwrap()
        .arg("type")
        .arg("Array[Integer]")
        .assert()
        .success()
        .stdout(predicate::str::contains("ClassInstance"));
}

#[test]
fn type_rejects_a_malformed_expression() {
    Command::cargo_bin("tsigc")
        .unwrap()
        .arg("type")
        .arg("|||")
        .assert()
        .failure();
}

#[test]
fn config_flag_points_at_a_toml_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("tsig.toml");
    fs::write(&config_path, "verbose = true\ninclude_comments = false\n").unwrap();

    let file = dir.path().join("ok.rbs");
    fs::write(&file, "FOO: Integer\n").unwrap();

    Command::cargo_bin("tsigc")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .arg("check")
        .arg(&file)
        .assert()
        .success();
}
