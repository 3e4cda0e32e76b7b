//! Segment plan types shared by the planner, the manifest parser and the
//! executor.
//!
//! A [`Plan`] is an ordered list of [`Segment`]s. Both the fixed-duration
//! planner and the manifest parser produce one, and the executor consumes it
//! exactly once.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Manifest flavour, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestFormat {
    /// A JSON array of record objects.
    Json,
    /// A CSV file whose first line names the columns.
    Csv,
}

impl ManifestFormat {
    /// Pick the format for a manifest path, or `None` for other extensions.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Describe the record layout this format expects.
    pub fn schema(&self) -> &'static str {
        match self {
            Self::Json => {
                "The format of each json array element should be:\n\
                 {\"start_time\": <int>, \"length\": <int>, \"rename_to\": <string>}\n\
                 (\"end_time\" may be given instead of \"length\")"
            }
            Self::Csv => {
                "start_time,length,rename_to should be the first line in the csv file\n\
                 (end_time may be given instead of length)"
            }
        }
    }
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// A point in time or a length, as handed to ffmpeg's `-ss` / `-t` options.
///
/// Planner output is always whole seconds. Manifest values keep the token the
/// user wrote (`"90"`, `"1.5"`, `"00:01:30"`) so ffmpeg sees it verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeValue {
    /// Whole seconds.
    Seconds(u64),
    /// A validated ffmpeg time token.
    Literal(String),
}

impl TimeValue {
    /// Validate a time token: plain seconds (`"12"`, `"12.5"`) or
    /// `[HH:]MM:SS[.frac]`, optionally with a leading `-`.
    ///
    /// Returns `None` for anything ffmpeg would not accept as a duration.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        literal_seconds(token)?;
        Some(Self::Literal(token.to_string()))
    }

    /// The value in seconds.
    pub fn as_secs_f64(&self) -> f64 {
        match self {
            Self::Seconds(s) => *s as f64,
            // Literals are validated on construction.
            Self::Literal(s) => literal_seconds(s).unwrap_or(f64::NAN),
        }
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seconds(s) => write!(f, "{s}"),
            Self::Literal(s) => f.write_str(s),
        }
    }
}

impl From<u64> for TimeValue {
    fn from(secs: u64) -> Self {
        Self::Seconds(secs)
    }
}

fn literal_seconds(token: &str) -> Option<f64> {
    let (sign, body) = match token.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, token),
    };

    let parts: Vec<&str> = body.split(':').collect();
    if parts.len() > 3 {
        return None;
    }

    let mut total = 0.0;
    for (i, part) in parts.iter().enumerate() {
        let is_last = i == parts.len() - 1;
        let valid = !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_digit() || (is_last && c == '.'));
        if !valid {
            return None;
        }
        let value: f64 = part.parse().ok()?;
        total = total * 60.0 + value;
    }

    total.is_finite().then_some(sign * total)
}

/// One output file of a split run.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Seek offset into the source (`-ss`).
    pub start: TimeValue,
    /// Length of the segment (`-t`).
    pub duration: TimeValue,
    /// Where ffmpeg writes the segment.
    pub output: PathBuf,
}

impl Segment {
    /// Build a segment, enforcing `start >= 0` and `duration > 0`.
    pub fn new(start: TimeValue, duration: TimeValue, output: impl Into<PathBuf>) -> Result<Self> {
        let output = output.into();
        if !(start.as_secs_f64() >= 0.0) {
            return Err(Error::invalid_argument(format!(
                "segment {} starts before the beginning of the media ({start})",
                output.display()
            )));
        }
        if !(duration.as_secs_f64() > 0.0) {
            return Err(Error::invalid_argument(format!(
                "segment {} has a non-positive duration ({duration})",
                output.display()
            )));
        }
        Ok(Self {
            start,
            duration,
            output,
        })
    }
}

/// Ordered list of segments. Insertion order is output order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    segments: Vec<Segment>,
}

impl Plan {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment, rejecting a second segment with the same output path.
    pub fn push(&mut self, segment: Segment) -> Result<()> {
        if self.segments.iter().any(|s| s.output == segment.output) {
            return Err(Error::invalid_argument(format!(
                "duplicate output path in plan: {}",
                segment.output.display()
            )));
        }
        self.segments.push(segment);
        Ok(())
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the plan has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over segments in output order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }
}

impl TryFrom<Vec<Segment>> for Plan {
    type Error = Error;

    fn try_from(segments: Vec<Segment>) -> Result<Self> {
        segments.into_iter().try_fold(Self::new(), |mut plan, segment| {
            plan.push(segment)?;
            Ok(plan)
        })
    }
}
