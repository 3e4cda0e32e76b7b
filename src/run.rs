//! Plan building and execution for one invocation.

use std::path::PathBuf;

use vidsplit_av::{actions, get_tool_path, probe, SegmentOutcome, ToolCommand};
use vidsplit_common::{Error, Plan, Result, SourceName};
use vidsplit_plan::{parse_manifest, plan_by_seconds, resolve_chunk_length};

use crate::config::ToolsConfig;
use crate::options::{SplitMode, SplitOptions};

/// What a run did.
#[derive(Debug)]
pub enum RunReport {
    /// `--dry-run`: the invocations that would have been made.
    Planned(Vec<ToolCommand>),
    /// Segments written, in plan order.
    Completed(Vec<SegmentOutcome>),
}

/// Build the plan for `opts`, then run or list the ffmpeg invocations.
pub fn run(opts: &SplitOptions, tools: &ToolsConfig) -> Result<RunReport> {
    if !opts.source.exists() {
        return Err(Error::invalid_argument(format!(
            "input file does not exist: {}",
            opts.source.display()
        )));
    }

    let plan = build_plan(opts, tools)?;

    // A dry run can still list commands when ffmpeg is not installed.
    let ffmpeg = match get_tool_path("ffmpeg", tools.ffmpeg_path.as_deref()) {
        Ok(path) => path,
        Err(_) if opts.dry_run => PathBuf::from("ffmpeg"),
        Err(e) => return Err(e),
    };

    if opts.dry_run {
        let commands = plan
            .iter()
            .map(|segment| {
                actions::segment_command(&ffmpeg, &opts.source, segment, &opts.settings)
            })
            .collect();
        return Ok(RunReport::Planned(commands));
    }

    let outcomes = actions::execute(&plan, &opts.source, &opts.settings, &ffmpeg)?;
    tracing::info!("Wrote {} segments", outcomes.len());
    Ok(RunReport::Completed(outcomes))
}

/// Produce the segment plan, probing the source when chunking.
pub fn build_plan(opts: &SplitOptions, tools: &ToolsConfig) -> Result<Plan> {
    match &opts.mode {
        SplitMode::Manifest(manifest) => {
            tracing::info!("Splitting {:?} by manifest {:?}", opts.source, manifest);
            parse_manifest(manifest, &opts.source)
        }
        SplitMode::Chunks {
            chunk_length,
            sizing,
        } => {
            let source = SourceName::from_path(&opts.source)?;
            let ffprobe = get_tool_path("ffprobe", tools.ffprobe_path.as_deref())?;
            let total = probe::probe_duration(&ffprobe, &opts.source)?;

            let chunk_length = match chunk_length {
                Some(secs) => *secs,
                None => {
                    let size = probe::file_size(&opts.source)?;
                    tracing::debug!("Source is {size} bytes");
                    resolve_chunk_length(total, size, sizing)?
                }
            };

            plan_by_seconds(&source, total, chunk_length)
        }
    }
}
