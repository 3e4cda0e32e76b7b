//! # vidsplit-av
//!
//! ffmpeg/ffprobe plumbing for vidsplit.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`get_tool_path`], [`check_tools`]) -- locate ffmpeg and ffprobe from
//!   config overrides or `PATH`.
//! - **Command execution** ([`ToolCommand`]) -- blocking builder for external
//!   process invocations.
//! - **Probing** ([`probe`]) -- media duration via ffprobe, file size.
//! - **Actions** ([`actions`]) -- cut a source into the segments of a plan.
//!
//! ## Features
//!
//! - `tracing` - Emit progress and command lines through `tracing`
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use vidsplit_av::{actions, get_tool_path, probe, TranscodeSettings};
//! use vidsplit_common::{Plan, Segment, TimeValue};
//!
//! let ffmpeg = get_tool_path("ffmpeg", None)?;
//! let ffprobe = get_tool_path("ffprobe", None)?;
//! let source = Path::new("/path/to/video.mp4");
//! let secs = probe::probe_duration(&ffprobe, source)?;
//!
//! let mut plan = Plan::new();
//! plan.push(Segment::new(TimeValue::Seconds(0), TimeValue::Seconds(secs / 2), "first-half.mp4")?)?;
//! actions::execute(&plan, source, &TranscodeSettings::default(), &ffmpeg)?;
//! # Ok::<(), vidsplit_common::Error>(())
//! ```

pub mod actions;
pub mod command;
pub mod probe;
pub mod tools;

// Re-exports
pub use actions::{SegmentOutcome, TranscodeSettings};
pub use command::{ToolCommand, ToolOutput};
pub use tools::{check_tool, check_tools, get_tool_path, require_tool, ToolInfo};
