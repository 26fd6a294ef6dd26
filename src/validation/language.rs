use log::{debug, warn};
use std::sync::Arc;

use crate::caption_processor::CaptionTrack;
use crate::providers::LanguageDetector;
use crate::validation::failure::{EXPECTED_LANGUAGE, ValidationFailure};

// @module: Spoken/written language conformance of caption text

/// Checks that caption text is detected as `en-US`
#[derive(Debug, Clone)]
pub struct LanguageValidator {
    detector: Arc<dyn LanguageDetector>,
}

impl LanguageValidator {
    pub fn new(detector: Arc<dyn LanguageDetector>) -> Self {
        Self { detector }
    }

    /// Check the joined text of all non-empty cues.
    ///
    /// Tracks without any text are not sent to the detector and pass.
    pub async fn evaluate(&self, track: &CaptionTrack) -> Option<ValidationFailure> {
        self.evaluate_text(&track.joined_text()).await
    }

    pub async fn evaluate_text(&self, text: &str) -> Option<ValidationFailure> {
        if text.is_empty() {
            debug!("No caption text, skipping language detection");
            return None;
        }

        match self.detector.detect_language(text).await {
            Ok(tag) if tag == EXPECTED_LANGUAGE => {
                debug!("Detected expected language {}", tag);
                None
            }
            Ok(tag) => Some(ValidationFailure::language_mismatch(tag)),
            Err(e) => {
                warn!("Language detection failed: {}", e);
                Some(ValidationFailure::language_undetectable(e))
            }
        }
    }
}
