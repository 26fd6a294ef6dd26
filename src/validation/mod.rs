/*!
 * Validation module for caption quality checks.
 *
 * - `coverage`: share of a time window covered by cues
 * - `language`: language conformance through a `LanguageDetector`
 * - `failure`: failure records and their JSON form
 * - `service`: orchestrates sniffing, extraction and both checks
 */

pub mod coverage;
pub mod failure;
pub mod language;
pub mod service;

// Re-export main types
pub use coverage::{CoverageResult, CoverageValidator, TimeWindow};
pub use failure::{EXPECTED_LANGUAGE, ValidationFailure};
pub use language::LanguageValidator;
pub use service::{ValidationReport, ValidationRequest, ValidationService, ValidationStage};
