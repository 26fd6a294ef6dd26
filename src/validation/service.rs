/*!
 * Validation orchestration.
 *
 * Runs one validation pass over caption content:
 * sniffing -> extracting -> coverage -> language -> done.
 *
 * An unsupported format ends the run with `AppError::UnsupportedFormat`. Otherwise
 * both checks always run and every failure they find is collected in the report.
 */

use log::{debug, info, warn};
use std::fmt;
use std::io::Write;
use std::sync::Arc;

use crate::caption_processor::{CaptionFormat, CaptionTrack, SNIFF_PREFIX_LEN, sniff_format_with_limit};
use crate::errors::AppError;
use crate::providers::LanguageDetector;
use crate::validation::coverage::{CoverageValidator, TimeWindow};
use crate::validation::failure::ValidationFailure;
use crate::validation::language::LanguageValidator;

/// Stages of a validation run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStage {
    Sniffing,
    Extracting,
    EvaluatingCoverage,
    EvaluatingLanguage,
    Done,
}

impl fmt::Display for ValidationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sniffing => "sniffing",
            Self::Extracting => "extracting",
            Self::EvaluatingCoverage => "evaluating coverage",
            Self::EvaluatingLanguage => "evaluating language",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Parameters of one validation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationRequest {
    /// Window the captions must cover
    pub window: TimeWindow,
    /// Minimum coverage in percent
    pub required_coverage: f64,
}

/// Everything a validation run found
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub format: CaptionFormat,
    pub cue_count: usize,
    pub skipped_count: usize,
    /// Coverage failure first, then language failure
    pub failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    /// True when no check failed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Write each failure as one JSON object per line
    pub fn write_json_lines<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        for failure in &self.failures {
            writeln!(out, "{}", failure.to_json()?)?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Orchestrates sniffing, extraction and both checks
#[derive(Debug, Clone)]
pub struct ValidationService {
    language: LanguageValidator,
    sniff_prefix_len: usize,
}

impl ValidationService {
    pub fn new(detector: Arc<dyn LanguageDetector>) -> Self {
        Self {
            language: LanguageValidator::new(detector),
            sniff_prefix_len: SNIFF_PREFIX_LEN,
        }
    }

    /// Override how many leading bytes are used for format sniffing
    pub fn with_sniff_prefix_len(mut self, sniff_prefix_len: usize) -> Self {
        self.sniff_prefix_len = sniff_prefix_len;
        self
    }

    pub fn sniff_prefix_len(&self) -> usize {
        self.sniff_prefix_len
    }

    /// Classify content from its leading bytes
    pub fn sniff(&self, header: &[u8]) -> CaptionFormat {
        let format = sniff_format_with_limit(header, self.sniff_prefix_len);
        debug!("[{}] content classified as {}", ValidationStage::Sniffing, format);
        format
    }

    /// Validate whole caption content
    pub async fn validate_content(
        &self,
        content: &[u8],
        request: &ValidationRequest,
    ) -> Result<ValidationReport, AppError> {
        let format = self.sniff(content);
        let text = String::from_utf8_lossy(content);
        self.validate_as(&text, format, request).await
    }

    /// Validate content whose format was sniffed separately
    pub async fn validate_as(
        &self,
        content: &str,
        format: CaptionFormat,
        request: &ValidationRequest,
    ) -> Result<ValidationReport, AppError> {
        debug!("[{}] parsing {} content", ValidationStage::Extracting, format);
        let track = CaptionTrack::parse(content, format).ok_or(AppError::UnsupportedFormat)?;

        if track.skipped_count() > 0 {
            warn!(
                "Skipped {} malformed cue(s), {} cue(s) usable",
                track.skipped_count(),
                track.cue_count()
            );
        }

        let failures = self.validate_track(&track, request).await;

        info!(
            "Validated {} cue(s) ({}): {} failure(s)",
            track.cue_count(),
            format,
            failures.len()
        );
        debug!("[{}]", ValidationStage::Done);

        Ok(ValidationReport {
            format,
            cue_count: track.cue_count(),
            skipped_count: track.skipped_count(),
            failures,
        })
    }

    /// Run both checks on an extracted track; neither short-circuits the other
    pub async fn validate_track(
        &self,
        track: &CaptionTrack,
        request: &ValidationRequest,
    ) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();

        debug!("[{}]", ValidationStage::EvaluatingCoverage);
        let coverage = CoverageValidator::new(request.required_coverage);
        if let Some(failure) = coverage.evaluate(track.cues(), request.window) {
            failures.push(failure);
        }

        debug!("[{}]", ValidationStage::EvaluatingLanguage);
        if let Some(failure) = self.language.evaluate(track).await {
            failures.push(failure);
        }

        failures
    }
}
