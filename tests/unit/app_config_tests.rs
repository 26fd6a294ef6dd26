/*!
 * Tests for configuration loading
 */

use anyhow::Result;
use caption_validator::app_config::{Config, LogLevel};
use caption_validator::errors::ConfigError;

use crate::common;

/// Test that a full config file is loaded field by field
#[test]
fn test_fromFile_withFullConfig_shouldLoadAllFields() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "validator.json",
        r#"{
            "required_coverage": 95.5,
            "language": { "endpoint": "https://lang.example.com/detect", "timeout_secs": 5 },
            "sniff_prefix_bytes": 64,
            "log_level": "info"
        }"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.required_coverage, 95.5);
    assert_eq!(config.language.endpoint, "https://lang.example.com/detect");
    assert_eq!(config.language.timeout_secs, 5);
    assert_eq!(config.sniff_prefix_bytes, 64);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
    Ok(())
}

/// Test that an empty object yields the defaults and fails only on the endpoint
#[test]
fn test_fromFile_withEmptyObject_shouldUseDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "empty.json", "{}")?;

    let config = Config::from_file(&path)?;

    assert_eq!(config, Config::default());
    assert_eq!(config.validate(), Err(ConfigError::MissingEndpoint));
    Ok(())
}

/// Test that malformed JSON and missing files are reported with the path
#[test]
fn test_fromFile_withBadInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;

    let err = Config::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("broken.json"));

    assert!(Config::from_file(temp_dir.path().join("missing.json")).is_err());
    Ok(())
}
