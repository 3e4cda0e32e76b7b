//! Segment extraction with ffmpeg.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use vidsplit_common::{Plan, Result, Segment};

use crate::command::ToolCommand;

/// Codec and flag settings applied to every segment invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeSettings {
    /// Video codec passed to `-vcodec`; `copy` keeps the stream as is.
    pub vcodec: String,
    /// Audio codec passed to `-acodec`; `copy` keeps the stream as is.
    pub acodec: String,
    /// Extra raw ffmpeg arguments, inserted before the seek options.
    pub extra: Vec<String>,
    /// Pass `-y` so existing outputs are overwritten without prompting.
    pub overwrite: bool,
}

impl Default for TranscodeSettings {
    fn default() -> Self {
        Self {
            vcodec: "copy".to_string(),
            acodec: "copy".to_string(),
            extra: Vec::new(),
            overwrite: false,
        }
    }
}

/// Result of one successful segment invocation.
#[derive(Debug, Clone)]
pub struct SegmentOutcome {
    /// One-based position in the plan.
    pub index: usize,
    /// File written by ffmpeg.
    pub output: PathBuf,
    /// Wall-clock time spent in ffmpeg.
    pub elapsed: Duration,
}

/// Build the ffmpeg invocation for one segment:
///
/// `ffmpeg -i <source> -vcodec <v> -acodec <a> [-y] <extra...> -ss <start> -t <duration> <output>`
pub fn segment_command(
    ffmpeg: &Path,
    source: &Path,
    segment: &Segment,
    settings: &TranscodeSettings,
) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffmpeg.to_path_buf());
    cmd.arg("-i").path_arg(source);
    cmd.args(["-vcodec", settings.vcodec.as_str()]);
    cmd.args(["-acodec", settings.acodec.as_str()]);
    if settings.overwrite {
        cmd.arg("-y");
    }
    cmd.args(settings.extra.iter().cloned());
    cmd.arg("-ss").arg(segment.start.to_string());
    cmd.arg("-t").arg(segment.duration.to_string());
    cmd.path_arg(&segment.output);
    cmd
}

/// Run ffmpeg once per segment, strictly in plan order.
///
/// The first failing invocation aborts the run. Outputs written before the
/// failure are left in place.
///
/// # Errors
///
/// Returns the first [`vidsplit_common::Error::ExternalToolFailure`] (or
/// [`vidsplit_common::Error::ToolNotFound`]) encountered.
pub fn execute(
    plan: &Plan,
    source: &Path,
    settings: &TranscodeSettings,
    ffmpeg: &Path,
) -> Result<Vec<SegmentOutcome>> {
    let total = plan.len();
    let mut outcomes = Vec::with_capacity(total);

    for (i, segment) in plan.iter().enumerate() {
        let cmd = segment_command(ffmpeg, source, segment, settings);

        #[cfg(feature = "tracing")]
        {
            tracing::info!(
                "[{}/{total}] {} (start {}, length {})",
                i + 1,
                segment.output.display(),
                segment.start,
                segment.duration
            );
            tracing::debug!("About to run: {cmd}");
        }

        let started = Instant::now();
        if let Err(e) = cmd.execute() {
            #[cfg(feature = "tracing")]
            tracing::error!(
                "Segment {}/{total} ({}) failed; aborting",
                i + 1,
                segment.output.display()
            );
            return Err(e);
        }

        outcomes.push(SegmentOutcome {
            index: i + 1,
            output: segment.output.clone(),
            elapsed: started.elapsed(),
        });
    }

    Ok(outcomes)
}
