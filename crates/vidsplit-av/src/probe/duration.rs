//! Duration probing via ffprobe.

use std::path::Path;

use regex::Regex;
use vidsplit_common::{Error, Result};

use crate::command::ToolCommand;

/// Duration of `path` in whole seconds, as reported by ffprobe.
///
/// # Errors
///
/// - [`Error::ToolNotFound`] if ffprobe cannot be found.
/// - [`Error::MediaProbeFailure`] if ffprobe fails or its output carries no
///   duration.
pub fn probe_duration(ffprobe: &Path, path: &Path) -> Result<u64> {
    let mut cmd = ToolCommand::new(ffprobe.to_path_buf());
    cmd.args([
        "-v",
        "error",
        "-show_entries",
        "format=duration",
        "-of",
        "default=noprint_wrappers=1:nokey=1",
    ]);
    cmd.path_arg(path);

    #[cfg(feature = "tracing")]
    tracing::debug!("Probing duration: {cmd}");

    let output = cmd.execute().map_err(|e| match e {
        Error::ExternalToolFailure { message, .. } => Error::MediaProbeFailure(message),
        other => other,
    })?;
    // Older builds only report the duration in the banner on stderr.
    let secs = parse_duration(&output.stdout)
        .or_else(|stdout_err| parse_duration(&output.stderr).map_err(|_| stdout_err))?;

    #[cfg(feature = "tracing")]
    tracing::info!("Video length in seconds: {secs}");

    Ok(secs)
}

/// Parse a duration from prober output, truncating to whole seconds.
///
/// Accepts either a bare seconds value (`123.456000`, what
/// `ffprobe -show_entries format=duration` prints) or an `HH:MM:SS.ff`
/// duration embedded in diagnostic text (`Duration: 00:02:03.45, start: ...`).
///
/// # Examples
///
/// ```
/// use vidsplit_av::probe::parse_duration;
///
/// assert_eq!(parse_duration("123.4560000\n").unwrap(), 123);
/// assert_eq!(parse_duration("  Duration: 01:02:03.45, start: 0.000000").unwrap(), 3723);
/// ```
pub fn parse_duration(output: &str) -> Result<u64> {
    let trimmed = output.trim();

    if let Ok(secs) = trimmed.parse::<f64>() {
        if secs.is_finite() && secs >= 0.0 {
            return Ok(secs.trunc() as u64);
        }
    }

    let re = Regex::new(r"Duration: (\d{2,}):(\d{2}):(\d{2})(?:\.\d+)?")
        .map_err(|e| Error::MediaProbeFailure(e.to_string()))?;

    if let Some(caps) = re.captures(output) {
        let field = |i: usize| caps[i].parse::<u64>().ok();
        return field(1)
            .and_then(|h| h.checked_mul(3600))
            .zip(field(2))
            .and_then(|(h, m)| h.checked_add(m * 60))
            .zip(field(3))
            .and_then(|(hm, s)| hm.checked_add(s))
            .ok_or_else(|| {
                Error::MediaProbeFailure(format!("duration out of range: {:?}", &caps[0]))
            });
    }

    let shown: String = trimmed.chars().take(80).collect();
    Err(Error::MediaProbeFailure(format!(
        "no duration in probe output: {shown:?}"
    )))
}
