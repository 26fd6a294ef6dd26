/*!
 * # caption-validator
 *
 * A Rust library for checking timed-text caption tracks before they ship.
 *
 * ## Features
 *
 * - Detect WebVTT and SRT content from the first bytes of a file
 * - Extract cues tolerantly; malformed cues are skipped and counted
 * - Measure how much of a requested time window the cues cover
 * - Check the caption language through an external detection service:
 *   - HTTP endpoint answering `{"lang": "<tag>"}`
 *   - In-process mock for tests
 * - Report every failure as one JSON object per line
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: WebVTT and SRT timestamp parsing
 * - `caption_processor`: Format sniffing and cue extraction
 * - `validation`: Quality checks:
 *   - `validation::coverage`: Time window coverage
 *   - `validation::language`: Language conformance
 *   - `validation::failure`: Failure records and their JSON form
 *   - `validation::service`: Orchestration of a validation run
 * - `providers`: Language detection clients:
 *   - `providers::http`: HTTP endpoint client
 *   - `providers::mock`: In-process mock detector
 *   - `providers::mock_server`: Mock detection server router
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `logging`: Stderr logger
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod caption_processor;
pub mod errors;
pub mod file_utils;
pub mod logging;
pub mod providers;
pub mod timecode;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use caption_processor::{CaptionCue, CaptionFormat, CaptionTrack, sniff_format};
pub use errors::{AppError, ConfigError, DetectorError, TimecodeError};
pub use providers::{HttpLanguageDetector, LanguageDetector};
pub use timecode::{TimecodeStyle, parse_timecode};
pub use validation::{TimeWindow, ValidationFailure, ValidationReport, ValidationRequest, ValidationService};
