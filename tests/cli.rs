// tests/cli.rs
use std::process::Command;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_statement_extractor"))
}

#[test]
fn missing_path_prints_envelope_and_exits_one() {
    let output = binary().output().expect("binary should run");

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value, serde_json::json!({"success": false, "error": "No PDF path provided"}));
}

#[test]
fn unreadable_document_is_a_failure_envelope_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("statement.pdf");
    std::fs::write(&path, b"this is not a pdf").unwrap();

    let output = binary().arg(&path).output().expect("binary should run");

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["success"], false);
    assert_eq!(value["filename"], "statement.pdf");
    assert_eq!(value["transactionCount"], 0);
    assert_eq!(value["transactions"], serde_json::json!([]));
    assert!(value["error"].is_string());
}

#[test]
fn arguments_after_the_path_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.pdf");
    let second = dir.path().join("b.pdf");
    std::fs::write(&first, b"not a pdf").unwrap();

    let output = binary().arg(&first).arg(&second).arg("-z").output().expect("binary should run");

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["filename"], "a.pdf");
    assert_eq!(value["success"], false);
}

#[test]
fn path_starting_with_a_hyphen_is_treated_as_a_path() {
    let dir = tempfile::tempdir().unwrap();

    let output = binary()
        .current_dir(dir.path())
        .arg("-x.pdf")
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["success"], false);
    assert_eq!(value["filename"], "-x.pdf");
    assert!(value["error"].is_string());
}

#[test]
fn invalid_option_value_still_answers_with_json() {
    let output = binary().args(["--section", "nonsense", "a.pdf"]).output().expect("binary should run");

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["success"], false);
    assert!(value["error"].as_str().unwrap().contains("nonsense"));
    assert_eq!(value.as_object().unwrap().len(), 2);
}
