/*!
 * Validation failure records and their JSON wire form.
 *
 * Each failure serializes to a single JSON object tagged by `type`:
 * - `caption_coverage`: coverage below the required percentage
 * - `incorrect_language`: detected language is not the expected one, or could not
 *   be detected at all
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// The only language tag accepted by the language check
pub const EXPECTED_LANGUAGE: &str = "en-US";

/// Tag reported when the detector could not give an answer
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// A quality problem found in a usable caption file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ValidationFailure {
    #[serde(rename = "caption_coverage")]
    Coverage {
        #[serde(rename = "required_coverage")]
        required_pct: f64,
        #[serde(rename = "actual_coverage")]
        actual_pct: f64,
        #[serde(rename = "start_time")]
        window_start: f64,
        #[serde(rename = "end_time")]
        window_end: f64,
        #[serde(rename = "description")]
        message: String,
    },

    #[serde(rename = "incorrect_language")]
    Language {
        #[serde(rename = "detected_language")]
        detected: String,
        #[serde(rename = "expected_language")]
        expected: String,
        #[serde(rename = "description")]
        message: String,
    },
}

impl ValidationFailure {
    /// Coverage failure with the description pre-formatted to two decimals
    pub fn coverage(required_pct: f64, actual_pct: f64, window_start: f64, window_end: f64) -> Self {
        Self::Coverage {
            required_pct,
            actual_pct,
            window_start,
            window_end,
            message: format!(
                "Caption coverage of {:.2}% is below required {:.2}%",
                actual_pct, required_pct
            ),
        }
    }

    /// Detected language differs from the expected one
    pub fn language_mismatch(detected: impl Into<String>) -> Self {
        let detected = detected.into();
        let message = format!(
            "Detected language '{}' does not match expected '{}'",
            detected, EXPECTED_LANGUAGE
        );
        Self::Language {
            detected,
            expected: EXPECTED_LANGUAGE.to_string(),
            message,
        }
    }

    /// Detection itself failed; reported as language `unknown`
    pub fn language_undetectable(error: impl fmt::Display) -> Self {
        Self::Language {
            detected: UNKNOWN_LANGUAGE.to_string(),
            expected: EXPECTED_LANGUAGE.to_string(),
            message: format!("Failed to detect language: {}", error),
        }
    }

    /// Wire name of the failure category
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Coverage { .. } => "caption_coverage",
            Self::Language { .. } => "incorrect_language",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Coverage { message, .. } | Self::Language { message, .. } => message,
        }
    }

    /// Single-line JSON object
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}
