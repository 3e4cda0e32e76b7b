//! Fixed-duration chunk planning.
//!
//! [`resolve_chunk_length`] turns a chunk count or a target file size into a
//! chunk length in seconds; [`plan_by_seconds`] lays out the chunks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vidsplit_common::{Error, Plan, Result, Segment, SourceName};

/// Default shrink factor applied to `--split-filesize` to leave room for
/// container overhead.
pub const DEFAULT_FILESIZE_FACTOR: f64 = 0.95;

/// How a target file size is turned into chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkStrategy {
    /// Extrapolate the chunk length from the overall bitrate. Chunks come out
    /// near the target size but may overshoot.
    #[default]
    Eager,
    /// Pick a chunk count first, then spread the duration evenly across it.
    Even,
}

impl fmt::Display for ChunkStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eager => write!(f, "eager"),
            Self::Even => write!(f, "even"),
        }
    }
}

impl FromStr for ChunkStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "eager" => Ok(Self::Eager),
            "even" => Ok(Self::Even),
            _ => Err(format!("unknown chunk strategy: {s} (expected eager or even)")),
        }
    }
}

/// Inputs used to derive a chunk length when none was given directly.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingOptions {
    /// Requested number of chunks. Wins over the file-size derivation.
    pub target_chunks: Option<u64>,
    /// Approximate size of each chunk in bytes.
    pub target_filesize: Option<u64>,
    /// Multiplier applied to `target_filesize` before use.
    pub filesize_factor: f64,
    /// How `target_filesize` is turned into chunks.
    pub strategy: ChunkStrategy,
}

impl Default for SizingOptions {
    fn default() -> Self {
        Self {
            target_chunks: None,
            target_filesize: None,
            filesize_factor: DEFAULT_FILESIZE_FACTOR,
            strategy: ChunkStrategy::default(),
        }
    }
}

/// Derive a chunk length in seconds from a chunk count or a target size.
///
/// Precedence:
/// 1. an explicit `target_chunks` gives `ceil(total_duration / target_chunks)`;
/// 2. otherwise a target size is shrunk by `filesize_factor`, then
///    - `even`: `ceil(total_duration / ceil(file_size / budget))`,
///    - `eager`: `floor(budget / file_size * total_duration)`.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when the options are out of range or nothing
/// yields a positive chunk length.
pub fn resolve_chunk_length(
    total_duration: u64,
    file_size: u64,
    opts: &SizingOptions,
) -> Result<u64> {
    if let Some(chunks) = opts.target_chunks {
        if chunks == 0 {
            return Err(Error::invalid_argument("chunk count must be positive"));
        }
        let chunk_length = total_duration.div_ceil(chunks);
        tracing::debug!("{chunks} chunks over {total_duration}s -> {chunk_length}s per chunk");
        return non_zero(chunk_length);
    }

    let Some(target) = opts.target_filesize else {
        return non_zero(0);
    };

    if !opts.filesize_factor.is_finite() || opts.filesize_factor <= 0.0 {
        return Err(Error::invalid_argument(format!(
            "filesize factor must be positive, got {}",
            opts.filesize_factor
        )));
    }

    let budget = (target as f64 * opts.filesize_factor).floor() as u64;
    if budget == 0 || file_size == 0 {
        return non_zero(0);
    }

    let chunk_length = match opts.strategy {
        ChunkStrategy::Even => {
            let chunks = file_size.div_ceil(budget);
            tracing::debug!(
                "{file_size} bytes at {budget} bytes per chunk -> {chunks} chunks"
            );
            total_duration.div_ceil(chunks)
        }
        ChunkStrategy::Eager => {
            (budget as f64 / file_size as f64 * total_duration as f64).floor() as u64
        }
    };

    tracing::debug!("{} strategy -> {chunk_length}s per chunk", opts.strategy);
    non_zero(chunk_length)
}

fn non_zero(chunk_length: u64) -> Result<u64> {
    if chunk_length == 0 {
        Err(Error::invalid_argument("no split length resolvable"))
    } else {
        Ok(chunk_length)
    }
}

/// Lay out `ceil(total_duration / chunk_length)` chunks of `chunk_length`
/// seconds, named `<base>-<n>-of-<count>.<ext>`.
///
/// The last chunk keeps the full `chunk_length`; ffmpeg stops at the end of
/// the stream.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] if `chunk_length` is zero.
/// - [`Error::DegenerateSplit`] if the media fits in a single chunk.
pub fn plan_by_seconds(source: &SourceName, total_duration: u64, chunk_length: u64) -> Result<Plan> {
    if chunk_length == 0 {
        return Err(Error::invalid_argument("invalid chunk length: must be > 0"));
    }

    let count = total_duration.div_ceil(chunk_length);
    if count <= 1 {
        return Err(Error::DegenerateSplit {
            duration: total_duration,
            chunk_length,
        });
    }

    let mut plan = Plan::new();
    for n in 0..count {
        plan.push(Segment::new(
            (n * chunk_length).into(),
            chunk_length.into(),
            source.chunk_output(n, count),
        )?)?;
    }

    tracing::info!("Planned {count} chunks of {chunk_length}s ({total_duration}s total)");
    Ok(plan)
}
