//! End-to-end tests for the `mfparse` binary.

use std::fs::write;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::tempdir;

fn mfparse() -> Command {
    let mut cmd = Command::cargo_bin("mfparse").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_parse_compact() {
    let output = mfparse()
        .args(["parse", "--compact", "Hello, {name}!"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json, json!(["Hello, ", ["name"], "!"]));
}

#[test]
fn test_parse_full_ast() {
    let output = mfparse()
        .args(["parse", "{n, plural, other{#}}"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json,
        json!([{
            "placeholder": {
                "plural": {
                    "id": "n",
                    "kind": "plural",
                    "offset": 0,
                    "cases": { "other": ["pound_sign"] }
                }
            }
        }])
    );
}

#[test]
fn test_parse_reads_stdin() {
    mfparse()
        .args(["parse", "--compact"])
        .write_stdin("{n, number}\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"number\""));
}

#[test]
fn test_parse_syntax_error_exits_with_dataerr() {
    mfparse()
        .args(["parse", "{}"])
        .assert()
        .code(exitcode::DATAERR)
        .stderr(predicate::str::contains(
            "Expected placeholder id but found }",
        ));
}

#[test]
fn test_rust_log_enables_debug_events() {
    mfparse()
        .env("RUST_LOG", "debug")
        .args(["parse", "}"])
        .assert()
        .code(exitcode::DATAERR)
        .stderr(predicate::str::contains("message pattern rejected"));
}

#[test]
fn test_debug_events_hidden_by_default() {
    mfparse()
        .args(["parse", "}"])
        .assert()
        .code(exitcode::DATAERR)
        .stderr(predicate::str::contains("message pattern rejected").not());
}

#[test]
fn test_parse_missing_file() {
    mfparse()
        .args(["parse", "--file", "/nonexistent/pattern.txt"])
        .assert()
        .code(exitcode::NOINPUT);
}

#[test]
fn test_parse_json_value() {
    let output = mfparse()
        .args(["parse", "--compact", "--json-value", "12.5"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json, json!(["12.5"]));
}

#[test]
fn test_tokens_json_keeps_partial_log() {
    let output = mfparse()
        .args(["tokens", "--json", "{a,b,c"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(exitcode::DATAERR));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["error"],
        json!("Expected } but found end of message pattern")
    );
    assert_eq!(json["tokens"].as_array().unwrap().len(), 6);
    assert_eq!(json["tokens"][5], json!({ "kind": "style", "text": "c" }));
}

#[test]
fn test_tokens_table() {
    mfparse()
        .args(["tokens", "{gender, select, other{x}}"])
        .assert()
        .success()
        .stdout(predicate::str::contains("selector"))
        .stdout(predicate::str::contains("\"gender\""));
}

#[test]
fn test_check_reports_bad_messages() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("en.json");
    let bad = dir.path().join("fr.json");
    write(&good, r#"{ "greeting": "Hello, {name}!", "count": 3 }"#).unwrap();
    write(
        &bad,
        r#"{ "greeting": "Bonjour {name}", "items": "{n, plural, one{# article}}" }"#,
    )
    .unwrap();

    let output = mfparse()
        .args(["check", "--json"])
        .arg(&good)
        .arg(&bad)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(exitcode::DATAERR));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let failures = json.as_array().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["key"], json!("items"));
    assert_eq!(
        failures[0]["message"],
        json!("\"other\" sub-message must be specified in plural")
    );
}

#[test]
fn test_check_passes_clean_catalog() {
    let dir = tempdir().unwrap();
    let catalog = dir.path().join("en.json");
    write(&catalog, r#"{ "a": "{x}", "b": "It's {n, number, integer}" }"#).unwrap();

    mfparse()
        .arg("check")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 with errors"));
}
