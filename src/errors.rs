/*!
 * Error types for the caption-validator application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Only `AppError` and `ConfigError` are fatal. Timecode errors are swallowed by the
 * cue extractor and detector errors are turned into language failures.
 */

use std::path::PathBuf;
use thiserror::Error;

use crate::timecode::TimecodeStyle;

/// Errors raised by the time code parser
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimecodeError {
    /// The text does not start with a fixed-width timestamp of the expected style
    #[error("invalid {style} time format: {input}")]
    Malformed {
        /// Offending text
        input: String,
        /// Style that was expected
        style: TimecodeStyle,
    },
}

/// Errors that can occur when calling the language detection service
#[derive(Error, Debug)]
pub enum DetectorError {
    /// Error when sending the request fails (connection refused, DNS, ...)
    #[error("failed to call language detection endpoint: {0}")]
    RequestFailed(String),

    /// The request did not complete within the configured timeout
    #[error("language detection request timed out after {0}s")]
    Timeout(u64),

    /// The endpoint answered with something other than 200
    #[error("language detection endpoint returned status: {status_code}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Response body, possibly empty
        message: String,
    },

    /// The response body is not `{"lang": "..."}`
    #[error("failed to decode language response: {0}")]
    ParseError(String),
}

/// Precondition violations detected before validation starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No language detection endpoint was supplied
    #[error("Language detection endpoint is required (use --endpoint)")]
    MissingEndpoint,

    /// The endpoint is not an absolute http(s) URL
    #[error("Invalid language detection endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// Endpoint as given
        endpoint: String,
        /// Why it was rejected
        reason: String,
    },

    /// Time window is empty, reversed or not finite
    #[error("End time must be greater than start time (got start={start}, end={end})")]
    InvalidWindow {
        /// Requested window start in seconds
        start: f64,
        /// Requested window end in seconds
        end: f64,
    },

    /// Required coverage is negative or not finite
    #[error("Required coverage must be a non-negative number (got {0})")]
    InvalidCoverage(f64),

    /// A numeric setting that must be positive is zero
    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),
}

/// Main application error type for conditions that stop a validation run
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {path}: {source}")]
    File {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Content was sniffed as neither WebVTT nor SRT
    #[error("Unsupported caption format")]
    UnsupportedFormat,

    /// Invalid arguments or configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Wrap an I/O error with the path it happened on
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}
