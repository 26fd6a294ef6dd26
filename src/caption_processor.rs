use log::debug;
use std::fmt;

use crate::timecode::{TimecodeStyle, parse_timecode};

// @module: Caption format sniffing and cue extraction

/// Number of leading bytes the sniffer looks at
pub const SNIFF_PREFIX_LEN: usize = 100;

const WEBVTT_MARKER: &str = "WEBVTT";
const TIMING_ARROW: &str = "-->";
const BOM: char = '\u{feff}';

// @struct: Single caption cue
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionCue {
    // @field: Start time in seconds
    pub start_time: f64,

    // @field: End time in seconds, not checked against start
    pub end_time: f64,

    // @field: Cue text, multi-line text joined with single spaces
    pub text: String,
}

impl CaptionCue {
    pub fn new(start_time: f64, end_time: f64, text: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            text: text.into(),
        }
    }
}

/// Caption formats recognised by the sniffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptionFormat {
    WebVtt,
    Srt,
    Unsupported,
}

impl CaptionFormat {
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Timestamp style used by the format, `None` when unsupported
    pub fn timecode_style(self) -> Option<TimecodeStyle> {
        match self {
            Self::WebVtt => Some(TimecodeStyle::Dotted),
            Self::Srt => Some(TimecodeStyle::Comma),
            Self::Unsupported => None,
        }
    }
}

impl fmt::Display for CaptionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WebVtt => write!(f, "webvtt"),
            Self::Srt => write!(f, "srt"),
            Self::Unsupported => write!(f, "unknown"),
        }
    }
}

/// Why a cue candidate was dropped
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The timing line does not split into exactly two sides around `-->`
    MalformedTimingLine,
    /// Start timestamp did not parse
    InvalidStartTime(String),
    /// End timestamp did not parse
    InvalidEndTime(String),
    /// SRT block with fewer than three lines
    BlockTooShort { lines: usize },
    /// SRT block whose second line has no `-->`
    MissingTimingLine,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTimingLine => write!(f, "malformed timing line"),
            Self::InvalidStartTime(t) => write!(f, "invalid start time '{}'", t),
            Self::InvalidEndTime(t) => write!(f, "invalid end time '{}'", t),
            Self::BlockTooShort { lines } => write!(f, "block has only {} line(s)", lines),
            Self::MissingTimingLine => write!(f, "second line is not a timing line"),
        }
    }
}

/// Outcome of a single cue candidate
#[derive(Debug, Clone, PartialEq)]
pub enum CueOutcome {
    Parsed(CaptionCue),
    Skipped {
        /// 1-based line of the timing line (WebVTT) or block start (SRT)
        line: usize,
        reason: SkipReason,
    },
}

/// Cues extracted from one caption file, in file order
#[derive(Debug, Clone)]
pub struct CaptionTrack {
    /// Format the content was parsed as
    pub format: CaptionFormat,

    outcomes: Vec<CueOutcome>,
}

impl CaptionTrack {
    /// Build a track directly from cues, mostly useful in tests
    pub fn from_cues(format: CaptionFormat, cues: Vec<CaptionCue>) -> Self {
        Self {
            format,
            outcomes: cues.into_iter().map(CueOutcome::Parsed).collect(),
        }
    }

    /// Extract cues from content that has already been sniffed.
    ///
    /// Returns `None` for `CaptionFormat::Unsupported`. Malformed cues never abort
    /// extraction; they are recorded as skipped and the scan continues.
    pub fn parse(content: &str, format: CaptionFormat) -> Option<Self> {
        let content = normalize_content(content);
        let outcomes = match format {
            CaptionFormat::WebVtt => Self::parse_webvtt(&content),
            CaptionFormat::Srt => Self::parse_srt(&content),
            CaptionFormat::Unsupported => return None,
        };

        let track = Self { format, outcomes };
        debug!(
            "Extracted {} {} cue(s), skipped {}",
            track.cue_count(),
            format,
            track.skipped_count()
        );
        Some(track)
    }

    /// Successfully parsed cues
    pub fn cues(&self) -> impl Iterator<Item = &CaptionCue> {
        self.outcomes.iter().filter_map(|o| match o {
            CueOutcome::Parsed(cue) => Some(cue),
            CueOutcome::Skipped { .. } => None,
        })
    }

    pub fn into_cues(self) -> Vec<CaptionCue> {
        self.outcomes
            .into_iter()
            .filter_map(|o| match o {
                CueOutcome::Parsed(cue) => Some(cue),
                CueOutcome::Skipped { .. } => None,
            })
            .collect()
    }

    /// Skipped candidates as `(line, reason)` pairs
    pub fn skipped(&self) -> impl Iterator<Item = (usize, &SkipReason)> {
        self.outcomes.iter().filter_map(|o| match o {
            CueOutcome::Skipped { line, reason } => Some((*line, reason)),
            CueOutcome::Parsed(_) => None,
        })
    }

    pub fn cue_count(&self) -> usize {
        self.cues().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.cue_count()
    }

    /// Text of all non-empty cues joined with single spaces
    pub fn joined_text(&self) -> String {
        self.cues()
            .map(|c| c.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    // WebVTT: every line containing `-->` starts a cue, text runs to the next blank line
    fn parse_webvtt(content: &str) -> Vec<CueOutcome> {
        let lines: Vec<&str> = content.split('\n').collect();
        let mut outcomes = Vec::new();

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i].trim();
            let line_no = i + 1;
            i += 1;

            if !line.contains(TIMING_ARROW) {
                continue;
            }

            let (start, end) = match parse_timing_line(line, TimecodeStyle::Dotted) {
                Ok(times) => times,
                Err(reason) => {
                    debug!("Skipping WebVTT cue at line {}: {}", line_no, reason);
                    outcomes.push(CueOutcome::Skipped { line: line_no, reason });
                    continue;
                }
            };

            let mut text_parts = Vec::new();
            while i < lines.len() && !lines[i].trim().is_empty() {
                text_parts.push(lines[i].trim());
                i += 1;
            }

            outcomes.push(CueOutcome::Parsed(CaptionCue::new(start, end, text_parts.join(" "))));
        }

        outcomes
    }

    // SRT: blank-line separated blocks of index, timing line, then text lines
    fn parse_srt(content: &str) -> Vec<CueOutcome> {
        let mut outcomes = Vec::new();
        let mut line_no = 1;

        for block in content.split("\n\n") {
            let block_line = line_no + leading_newlines(block);
            line_no += block.matches('\n').count() + 2;

            let lines: Vec<&str> = block.trim().split('\n').collect();
            if lines.len() < 3 {
                // Stray blank lines are not cue candidates
                if !block.trim().is_empty() {
                    let reason = SkipReason::BlockTooShort { lines: lines.len() };
                    debug!("Skipping SRT block at line {}: {}", block_line, reason);
                    outcomes.push(CueOutcome::Skipped { line: block_line, reason });
                }
                continue;
            }
            if !lines[1].contains(TIMING_ARROW) {
                let reason = SkipReason::MissingTimingLine;
                debug!("Skipping SRT block at line {}: {}", block_line, reason);
                outcomes.push(CueOutcome::Skipped { line: block_line, reason });
                continue;
            }

            match parse_timing_line(lines[1], TimecodeStyle::Comma) {
                Ok((start, end)) => {
                    // SRT text lines are joined as-is, without per-line trimming
                    let text = lines[2..].join(" ");
                    outcomes.push(CueOutcome::Parsed(CaptionCue::new(start, end, text)));
                }
                Err(reason) => {
                    debug!("Skipping SRT block at line {}: {}", block_line, reason);
                    outcomes.push(CueOutcome::Skipped { line: block_line, reason });
                }
            }
        }

        outcomes
    }
}

/// Classify content from its first bytes.
///
/// Only the first `SNIFF_PREFIX_LEN` bytes are examined. A `WEBVTT` token anywhere in
/// that prefix wins; otherwise a first line made only of ASCII digits means SRT.
pub fn sniff_format(content_prefix: &[u8]) -> CaptionFormat {
    sniff_format_with_limit(content_prefix, SNIFF_PREFIX_LEN)
}

/// Like `sniff_format` with a custom prefix length
pub fn sniff_format_with_limit(content_prefix: &[u8], limit: usize) -> CaptionFormat {
    let prefix = &content_prefix[..content_prefix.len().min(limit)];
    let header = String::from_utf8_lossy(prefix);
    let header = header.strip_prefix(BOM).unwrap_or(&*header);

    if header.contains(WEBVTT_MARKER) {
        return CaptionFormat::WebVtt;
    }

    let first_line = header.split('\n').next().unwrap_or_default().trim();
    if !first_line.is_empty() && first_line.bytes().all(|b| b.is_ascii_digit()) {
        return CaptionFormat::Srt;
    }

    CaptionFormat::Unsupported
}

// Split on `-->`, trim both sides and parse them in the given style
fn parse_timing_line(line: &str, style: TimecodeStyle) -> Result<(f64, f64), SkipReason> {
    let sides: Vec<&str> = line.split(TIMING_ARROW).collect();
    let [start, end] = sides.as_slice() else {
        return Err(SkipReason::MalformedTimingLine);
    };

    let start = start.trim();
    let end = end.trim();
    let start_time =
        parse_timecode(start, style).map_err(|_| SkipReason::InvalidStartTime(start.to_string()))?;
    let end_time =
        parse_timecode(end, style).map_err(|_| SkipReason::InvalidEndTime(end.to_string()))?;

    Ok((start_time, end_time))
}

fn normalize_content(content: &str) -> String {
    content.strip_prefix(BOM).unwrap_or(content).replace("\r\n", "\n")
}

fn leading_newlines(block: &str) -> usize {
    block.chars().take_while(|c| c.is_whitespace()).filter(|&c| c == '\n').count()
}
