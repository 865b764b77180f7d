//! CLI integration tests for the `excel` binary

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn excel() -> Command {
    Command::cargo_bin("excel").unwrap()
}

#[test]
fn test_help_lists_commands() {
    excel()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("read"))
        .stdout(predicate::str::contains("write"));
}

#[test]
fn test_version_flag() {
    excel()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_write_then_read_xlsx() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("people.xlsx");

    excel()
        .arg("write")
        .arg(&path)
        .args(["--sheet", "People", "--data", r#"[{"name":"Ann","age":25}]"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Write Complete"));

    let output = excel()
        .arg("read")
        .arg(&path)
        .args(["--sheet", "People"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows, json!([{"name": "Ann", "age": 25}]));
}

#[test]
fn test_write_from_stdin_and_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let from_stdin = temp_dir.path().join("stdin.csv");
    let from_file = temp_dir.path().join("file.csv");
    let input = temp_dir.path().join("rows.json");
    fs::write(&input, r#"[{"a":1,"b":"x"}]"#).unwrap();

    excel()
        .arg("write")
        .arg(&from_stdin)
        .write_stdin(r#"[{"a":1,"b":"x"}]"#)
        .assert()
        .success();

    excel()
        .arg("write")
        .arg(&from_file)
        .arg("--input")
        .arg(&input)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&from_stdin).unwrap(), "a,b\n1,x\n");
    assert_eq!(fs::read_to_string(&from_file).unwrap(), "a,b\n1,x\n");
}

#[test]
fn test_read_to_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let csv = temp_dir.path().join("data.csv");
    let json_out = temp_dir.path().join("data.json");
    fs::write(&csv, "id,score\n1,9.5\n").unwrap();

    excel()
        .arg("read")
        .arg(&csv)
        .arg("--output")
        .arg(&json_out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows:   1"));

    let rows: Value = serde_json::from_str(&fs::read_to_string(&json_out).unwrap()).unwrap();
    assert_eq!(rows, json!([{"id": 1, "score": 9.5}]));
}

#[test]
fn test_read_unsupported_format_fails() {
    excel()
        .args(["read", "notes.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UnsupportedFormat"));
}

#[test]
fn test_write_empty_array_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.xlsx");

    excel()
        .arg("write")
        .arg(&path)
        .args(["--data", "[]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("EmptyInput"));
    assert!(!path.exists());
}

#[test]
fn test_write_data_conflicts_with_input() {
    excel()
        .args(["write", "out.csv", "--data", "[]", "--input", "rows.json"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_log_level_is_rejected() {
    excel()
        .args(["--log-level", "excel_mcp=loud", "read", "data.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid log filter"));

    excel()
        .env("EXCEL_MCP_LOG", "excel_mcp=loud")
        .args(["read", "data.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid log filter"));
}
