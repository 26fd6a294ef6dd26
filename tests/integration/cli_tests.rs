/*!
 * End-to-end tests of the caption-validator binary: exit codes and stdout contract
 */

#![allow(deprecated)] // Command::cargo_bin

use assert_cmd::Command;
use assert_cmd::assert::{Assert, OutputAssertExt};
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

use caption_validator::providers::mock_server::MockServerResponse;

use crate::common;

/// Get a command for the caption-validator binary
fn validator() -> Command {
    let mut cmd = Command::cargo_bin("caption-validator").unwrap();
    cmd.env_remove("CAPTION_VALIDATOR_ENDPOINT");
    cmd
}

fn caption_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), name, content).unwrap();
    (temp_dir, path)
}

/// Run the binary off the async runtime so the mock server keeps serving
async fn run_blocking(mut cmd: Command) -> Assert {
    let output = tokio::task::spawn_blocking(move || cmd.output()).await.unwrap().unwrap();
    output.assert()
}

fn stdout_lines(assert: &Assert) -> Vec<serde_json::Value> {
    String::from_utf8(assert.get_output().stdout.clone())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// ============================================================================
// Evaluated files: exit 0
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cli_withSufficientEnglishCaptions_shouldPrintNothing() {
    let (endpoint, _state) = common::start_mock_server(MockServerResponse::default()).await.unwrap();
    let (_dir, path) = caption_file("good.vtt", common::SINGLE_CUE_VTT);

    let mut cmd = validator();
    cmd.arg(&path)
        .args(["--t-start", "0", "--t-end", "10", "--coverage", "40"])
        .args(["--endpoint", &endpoint]);

    run_blocking(cmd).await.success().stdout(predicate::str::is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cli_withInsufficientCoverage_shouldPrintCoverageFailure() {
    let (endpoint, _state) = common::start_mock_server(MockServerResponse::default()).await.unwrap();
    let (_dir, path) = caption_file("good.vtt", common::SINGLE_CUE_VTT);

    let mut cmd = validator();
    cmd.arg(&path)
        .args(["--t_start", "0", "--t_end", "10", "--coverage", "50"])
        .args(["--endpoint", &endpoint]);

    let assert = run_blocking(cmd).await.success();
    let lines = stdout_lines(&assert);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["type"], "caption_coverage");
    assert_eq!(lines[0]["required_coverage"], 50.0);
    assert_eq!(lines[0]["actual_coverage"], 40.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cli_withSpanishSrt_shouldPrintBothFailuresInOrder() {
    let (endpoint, _state) = common::start_mock_server(MockServerResponse::Language("es-ES".to_string()))
        .await
        .unwrap();
    let (_dir, path) = caption_file("sparse.srt", common::TWO_CUE_SRT);

    let mut cmd = validator();
    cmd.arg(&path).args(["--t-end", "30"]).args(["--endpoint", &endpoint]);

    let assert = run_blocking(cmd).await.success();
    let lines = stdout_lines(&assert);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["type"], "caption_coverage");
    assert_eq!(lines[0]["required_coverage"], 80.0);
    assert_eq!(lines[1]["type"], "incorrect_language");
    assert_eq!(lines[1]["detected_language"], "es-ES");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cli_withUnreachableEndpoint_shouldReportUnknownLanguage() {
    let (_dir, path) = caption_file("good.vtt", common::SINGLE_CUE_VTT);

    let mut cmd = validator();
    cmd.arg(&path)
        .args(["--t-end", "10", "--coverage", "0", "--timeout-secs", "5"])
        .args(["--endpoint", "http://127.0.0.1:9/detect"]);

    let assert = run_blocking(cmd).await.success();
    let lines = stdout_lines(&assert);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["type"], "incorrect_language");
    assert_eq!(lines[0]["detected_language"], "unknown");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cli_withHugeSniffPrefixInConfig_shouldStillEvaluate() {
    let (endpoint, _state) = common::start_mock_server(MockServerResponse::default()).await.unwrap();
    let (dir, path) = caption_file("good.vtt", common::SINGLE_CUE_VTT);
    let config = common::create_test_file(
        dir.path(),
        "validator.json",
        r#"{"sniff_prefix_bytes": 18446744073709551615}"#,
    )
    .unwrap();

    let mut cmd = validator();
    cmd.arg(&path)
        .args(["--t-end", "10", "--coverage", "40"])
        .args(["--endpoint", &endpoint])
        .arg("--config")
        .arg(&config);

    run_blocking(cmd).await.success().stdout(predicate::str::is_empty());
}

// ============================================================================
// Files that cannot be evaluated: exit 1, nothing on stdout
// ============================================================================

#[test]
fn test_cli_withUnsupportedFile_shouldFailWithoutOutput() {
    let (_dir, path) = caption_file("notes.txt", "This is just plain text, not a caption file");

    validator()
        .arg(&path)
        .args(["--t-end", "30", "--endpoint", "http://127.0.0.1:9/detect"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unsupported caption format"));
}

#[test]
fn test_cli_withReversedWindow_shouldFail() {
    let (_dir, path) = caption_file("good.vtt", common::SINGLE_CUE_VTT);

    validator()
        .arg(&path)
        .args(["--t-start", "10", "--t-end", "10", "--endpoint", "http://127.0.0.1:9/detect"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_cli_withoutEndpoint_shouldFail() {
    let (_dir, path) = caption_file("good.vtt", common::SINGLE_CUE_VTT);

    validator()
        .arg(&path)
        .args(["--t-end", "10"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("endpoint"));
}

#[test]
fn test_cli_withMissingFile_shouldFail() {
    validator()
        .arg("/nonexistent/captions.vtt")
        .args(["--t-end", "10", "--endpoint", "http://127.0.0.1:9/detect"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_cli_withUnknownFlag_shouldExitOne() {
    validator().arg("--frobnicate").assert().code(1);
}

#[test]
fn test_cli_withoutInput_shouldExitOne() {
    validator()
        .args(["--t-end", "10", "--endpoint", "http://127.0.0.1:9/detect"])
        .assert()
        .code(1);
}

// ============================================================================
// Informational commands
// ============================================================================

#[test]
fn test_cli_help_shouldSucceed() {
    validator()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--t-start"));
}

#[test]
fn test_cli_completions_shouldPrintScript() {
    validator()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("caption-validator"));
}
