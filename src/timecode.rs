use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::errors::TimecodeError;

// @module: Fixed-width caption timestamps (HH:MM:SS.mmm / HH:MM:SS,mmm)

// @const: WebVTT timestamp, anchored at the start, followed by end or whitespace
static DOTTED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}):([0-9]{2}):([0-9]{2})\.([0-9]{3})(?:\s|$)").unwrap()
});

// @const: SRT timestamp
static COMMA_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}):([0-9]{2}):([0-9]{2}),([0-9]{3})(?:\s|$)").unwrap()
});

/// Separator style between seconds and milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimecodeStyle {
    /// `00:00:01.000`, used by WebVTT
    Dotted,
    /// `00:00:01,000`, used by SRT
    Comma,
}

impl TimecodeStyle {
    /// Character between the seconds and the milliseconds
    pub fn separator(self) -> char {
        match self {
            Self::Dotted => '.',
            Self::Comma => ',',
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            Self::Dotted => &DOTTED_REGEX,
            Self::Comma => &COMMA_REGEX,
        }
    }
}

impl fmt::Display for TimecodeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dotted => write!(f, "WebVTT"),
            Self::Comma => write!(f, "SRT"),
        }
    }
}

/// Parse a timestamp into elapsed seconds.
///
/// Hours, minutes and seconds are exactly two digits and milliseconds exactly
/// three. Values are not range-checked, `00:75:00.000` is 4500 seconds.
pub fn parse_timecode(text: &str, style: TimecodeStyle) -> Result<f64, TimecodeError> {
    let malformed = || TimecodeError::Malformed {
        input: text.to_string(),
        style,
    };

    let caps = style.regex().captures(text).ok_or_else(malformed)?;

    let mut parts = [0u32; 4];
    for (i, part) in parts.iter_mut().enumerate() {
        *part = caps
            .get(i + 1)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(malformed)?;
    }
    let [hours, minutes, seconds, millis] = parts;

    Ok(f64::from(hours * 3600 + minutes * 60 + seconds) + f64::from(millis) / 1000.0)
}

/// Format elapsed seconds back into a timestamp, rounding to the millisecond
pub fn format_timecode(seconds: f64, style: TimecodeStyle) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;

    format!(
        "{:02}:{:02}:{:02}{}{:03}",
        hours,
        minutes,
        secs,
        style.separator(),
        millis
    )
}
