/*!
 * Integration tests for the controller running against a real detection server
 */

use anyhow::Result;
use caption_validator::app_config::Config;
use caption_validator::app_controller::Controller;
use caption_validator::errors::AppError;
use caption_validator::providers::mock_server::MockServerResponse;
use caption_validator::validation::{TimeWindow, ValidationRequest};

use crate::common;

fn config_for(endpoint: &str) -> Config {
    let mut config = Config::default();
    config.language.endpoint = endpoint.to_string();
    config
}

fn request(start: f64, end: f64, required: f64) -> ValidationRequest {
    ValidationRequest {
        window: TimeWindow::new(start, end).unwrap(),
        required_coverage: required,
    }
}

fn json_lines(out: Vec<u8>) -> Vec<serde_json::Value> {
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

/// Test that a well covered English file prints nothing
#[tokio::test]
async fn test_run_withGoodCaptions_shouldPrintNothing() -> Result<()> {
    let (endpoint, state) = common::start_mock_server(MockServerResponse::default()).await?;
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "good.vtt", common::SINGLE_CUE_VTT)?;
    let controller = Controller::with_config(config_for(&endpoint))?;
    let mut out = Vec::new();

    let report = controller.run(&path, &request(0.0, 10.0, 40.0), &mut out).await?;

    assert!(report.is_clean());
    assert!(out.is_empty());
    assert_eq!(state.received(), vec!["Hello world".to_string()]);
    Ok(())
}

/// Test that coverage and language failures are both printed, coverage first
#[tokio::test]
async fn test_run_withSparseSpanishCaptions_shouldPrintBothFailures() -> Result<()> {
    let (endpoint, _state) = common::start_mock_server(MockServerResponse::Language("es-ES".to_string())).await?;
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "sparse.srt", common::TWO_CUE_SRT)?;
    let controller = Controller::with_config(config_for(&endpoint))?;
    let mut out = Vec::new();

    controller.run(&path, &request(0.0, 30.0, 80.0), &mut out).await?;

    let lines = json_lines(out);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["type"], "caption_coverage");
    assert_eq!(lines[1]["type"], "incorrect_language");
    assert_eq!(lines[1]["detected_language"], "es-ES");
    Ok(())
}

/// Test that a server error turns into an "unknown" language failure, not a fatal error
#[tokio::test]
async fn test_run_withFailingDetector_shouldReportUnknownLanguage() -> Result<()> {
    let (endpoint, _state) = common::start_mock_server(MockServerResponse::Status(503)).await?;
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "good.vtt", common::SINGLE_CUE_VTT)?;
    let controller = Controller::with_config(config_for(&endpoint))?;
    let mut out = Vec::new();

    controller.run(&path, &request(0.0, 10.0, 0.0), &mut out).await?;

    let lines = json_lines(out);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["detected_language"], "unknown");
    assert!(lines[0]["description"].as_str().unwrap().starts_with("Failed to detect language:"));
    Ok(())
}

/// Test that an unsupported file never reaches the detector
#[tokio::test]
async fn test_run_withUnsupportedFile_shouldFailBeforeDetection() -> Result<()> {
    let (endpoint, state) = common::start_mock_server(MockServerResponse::default()).await?;
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "notes.txt", "This is just plain text, not a caption file")?;
    let controller = Controller::with_config(config_for(&endpoint))?;
    let mut out = Vec::new();

    let err = controller.run(&path, &request(0.0, 30.0, 80.0), &mut out).await.unwrap_err();

    assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::UnsupportedFormat)));
    assert!(out.is_empty());
    assert!(state.received().is_empty());
    Ok(())
}
