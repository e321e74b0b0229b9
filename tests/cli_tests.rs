use pretty_assertions::assert_eq;
use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Runs the `littlec` binary itself, so stdout and exit codes are checked as
/// a user would see them.

fn littlec(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_littlec"))
        .args(args)
        .output()
        .expect("failed to run littlec")
}

fn littlec_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_littlec"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run littlec");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_report_exits_zero() {
    let output = littlec(&["tests/programs/simple.micro"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), include_str!("programs/simple.out"));
}

#[test]
fn test_duplicate_prints_only_the_error_line() {
    let output = littlec(&["tests/programs/duplicate.micro"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "DECLARATION ERROR x\n");
}

#[test]
fn test_explain_keeps_stdout_exact() {
    let output = littlec(&["--explain", "tests/programs/duplicate_param.micro"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "DECLARATION ERROR v\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("first declared here"), "stderr was:\n{}", stderr);
}

#[test]
fn test_parse_error_exits_two_with_empty_stdout() {
    let output = littlec_stdin(&["-"], "PROGRAM broken BEGIN INT ; END");
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout(&output), "");
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_missing_file_exits_two() {
    let output = littlec(&["tests/programs/does_not_exist.micro"]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_stdin_with_oversized_literal() {
    let src = "PROGRAM p BEGIN FUNCTION VOID main() BEGIN INT x; x := 99999999999999999999; END END";
    let output = littlec_stdin(&[], src);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Symbol table main\nname x type INT\n\n");
}

#[test]
fn test_emit_json() {
    let output = littlec(&["--emit", "json", "tests/programs/simple.micro"]);
    assert_eq!(output.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json[0]["name"], "GLOBAL");
    assert_eq!(json[0]["symbols"][1]["value"], "\"hello\"");
    assert_eq!(json[1]["name"], "main");
}
