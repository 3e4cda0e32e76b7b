//! Manifest-driven segment lists.
//!
//! A manifest names each output segment explicitly. Two layouts are read:
//!
//! - **JSON**: an array of `{start_time, length | end_time, rename_to}` objects.
//! - **CSV**: a header line naming the same columns, one record per row.
//!
//! Records map one-to-one onto [`Segment`]s in file order. Any malformed
//! record aborts the whole parse.

mod delimited;
mod json;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use vidsplit_common::{Error, ManifestFormat, Plan, Result, Segment, SourceName, TimeValue};

/// Length of a manifest segment.
#[derive(Debug, Clone, PartialEq)]
pub enum Span {
    /// The record gave a `length`.
    Length(TimeValue),
    /// The record gave an `end_time` and no `length`.
    EndTime(TimeValue),
}

impl Span {
    /// The value handed to ffmpeg's `-t`.
    ///
    /// An `end_time` is passed through unchanged, not converted into
    /// `end_time - start_time`; it only matches the intended end when the
    /// segment starts at zero.
    pub fn as_duration(&self) -> &TimeValue {
        match self {
            Span::Length(t) | Span::EndTime(t) => t,
        }
    }
}

/// A validated manifest record.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestRecord {
    /// Seek offset into the source.
    pub start_time: TimeValue,
    /// Length or end time.
    pub span: Span,
    /// Output name, with or without the source extension.
    pub rename_to: String,
}

impl ManifestRecord {
    /// Turn the record into a segment named after `source`'s extension.
    pub fn to_segment(&self, source: &SourceName) -> Result<Segment> {
        Segment::new(
            self.start_time.clone(),
            self.span.as_duration().clone(),
            source.manifest_output(&self.rename_to),
        )
    }
}

/// A record as read from disk, before required fields are checked.
///
/// Empty values count as absent.
#[derive(Debug, Default, Clone)]
pub(crate) struct RawRecord {
    pub start_time: Option<String>,
    pub length: Option<String>,
    pub end_time: Option<String>,
    pub rename_to: Option<String>,
}

impl RawRecord {
    /// Check required fields. `record` is the one-based record number used in
    /// error messages.
    pub fn validate(self, format: ManifestFormat, record: usize) -> Result<ManifestRecord> {
        let start_time = present(self.start_time)
            .ok_or_else(|| Error::field_missing("start_time", format, record))?;
        let start_time = parse_time(&start_time, "start_time", format, record)?;

        let span = match (present(self.length), present(self.end_time)) {
            (Some(length), _) => Span::Length(parse_time(&length, "length", format, record)?),
            (None, Some(end)) => Span::EndTime(parse_time(&end, "end_time", format, record)?),
            (None, None) => return Err(Error::field_missing("length", format, record)),
        };

        let rename_to = present(self.rename_to)
            .ok_or_else(|| Error::field_missing("rename_to", format, record))?;

        Ok(ManifestRecord {
            start_time,
            span,
            rename_to,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_time(value: &str, field: &str, format: ManifestFormat, record: usize) -> Result<TimeValue> {
    TimeValue::parse(value).ok_or_else(|| {
        Error::manifest_invalid(
            format,
            format!("record {record}: `{field}` value {value:?} is not a time"),
        )
    })
}

/// Read a manifest and build the plan for `source`.
///
/// # Errors
///
/// - [`Error::ManifestNotFound`] if `manifest` does not exist.
/// - [`Error::UnsupportedManifestFormat`] for extensions other than `.json`
///   and `.csv`.
/// - [`Error::ManifestFieldMissing`] if a record lacks `start_time`,
///   `length`/`end_time` or `rename_to`.
/// - [`Error::ManifestInvalid`] if the file cannot be decoded, holds no
///   records, or a record is out of range.
pub fn parse_manifest(manifest: &Path, source: &Path) -> Result<Plan> {
    if !manifest.exists() {
        return Err(Error::ManifestNotFound {
            path: manifest.to_path_buf(),
        });
    }

    let format = ManifestFormat::from_path(manifest).ok_or_else(|| {
        Error::UnsupportedManifestFormat {
            path: manifest.to_path_buf(),
        }
    })?;

    let source = SourceName::from_path(source)?;
    let reader = BufReader::new(File::open(manifest)?);
    let raw = match format {
        ManifestFormat::Json => json::read_records(reader)?,
        ManifestFormat::Csv => delimited::read_records(reader)?,
    };

    if raw.is_empty() {
        return Err(Error::manifest_invalid(format, "manifest contains no records"));
    }

    let mut plan = Plan::new();
    for (i, raw) in raw.into_iter().enumerate() {
        let record = raw.validate(format, i + 1)?;
        if matches!(record.span, Span::EndTime(_)) {
            tracing::debug!(
                "record {}: end_time {} passed to ffmpeg as the segment length",
                i + 1,
                record.span.as_duration()
            );
        }
        record
            .to_segment(&source)
            .and_then(|segment| plan.push(segment))
            .map_err(|e| match e {
                Error::InvalidArgument(msg) => {
                    Error::manifest_invalid(format, format!("record {}: {msg}", i + 1))
                }
                other => other,
            })?;
    }

    tracing::info!(
        "Loaded {} segments from {} manifest {}",
        plan.len(),
        format,
        manifest.display()
    );
    Ok(plan)
}
