/*!
 * Caption coverage validation.
 *
 * Coverage is the share of a requested time window overlapped by cues. Overlaps are
 * summed per cue, not unioned: two cues covering the same second both count it, so
 * the result may exceed 100%.
 */

use log::debug;

use crate::caption_processor::CaptionCue;
use crate::errors::ConfigError;
use crate::validation::failure::ValidationFailure;

/// Time window `[start, end)` in seconds, `end > start` guaranteed by construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    start: f64,
    end: f64,
}

impl TimeWindow {
    /// Create a window, rejecting empty, reversed and non-finite bounds
    pub fn new(start: f64, end: f64) -> Result<Self, ConfigError> {
        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(ConfigError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Seconds of the cue that fall inside the window, 0 when disjoint
    pub fn overlap(&self, cue: &CaptionCue) -> f64 {
        (cue.end_time.min(self.end) - cue.start_time.max(self.start)).max(0.0)
    }
}

/// Result of a coverage measurement
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageResult {
    /// Seconds covered, overlapping cues counted once each
    pub covered_secs: f64,
    /// `100 * covered_secs / window duration`
    pub actual_pct: f64,
    pub required_pct: f64,
    pub window: TimeWindow,
}

impl CoverageResult {
    pub fn passed(&self) -> bool {
        self.actual_pct >= self.required_pct
    }

    /// The failure record for this result, `None` when coverage is sufficient
    pub fn to_failure(&self) -> Option<ValidationFailure> {
        if self.passed() {
            return None;
        }
        Some(ValidationFailure::coverage(
            self.required_pct,
            self.actual_pct,
            self.window.start(),
            self.window.end(),
        ))
    }
}

/// Coverage validator for caption cues
#[derive(Debug, Clone)]
pub struct CoverageValidator {
    required_pct: f64,
}

impl CoverageValidator {
    pub fn new(required_pct: f64) -> Self {
        Self { required_pct }
    }

    /// Measure coverage of `window` by `cues`. Cue order does not matter.
    pub fn measure<'a, I>(&self, cues: I, window: TimeWindow) -> CoverageResult
    where
        I: IntoIterator<Item = &'a CaptionCue>,
    {
        assert!(window.end > window.start, "time window must not be empty");

        let covered_secs: f64 = cues.into_iter().map(|cue| window.overlap(cue)).sum();
        let actual_pct = 100.0 * covered_secs / window.duration();

        debug!(
            "Coverage: {:.3}s of {:.3}s window ({:.2}%, required {:.2}%)",
            covered_secs,
            window.duration(),
            actual_pct,
            self.required_pct
        );

        CoverageResult {
            covered_secs,
            actual_pct,
            required_pct: self.required_pct,
            window,
        }
    }

    /// Measure and return the failure record if coverage is below the requirement
    pub fn evaluate<'a, I>(&self, cues: I, window: TimeWindow) -> Option<ValidationFailure>
    where
        I: IntoIterator<Item = &'a CaptionCue>,
    {
        self.measure(cues, window).to_failure()
    }
}
