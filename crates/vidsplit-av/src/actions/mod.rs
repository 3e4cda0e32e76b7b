//! Media processing actions.
//!
//! Currently a single one: cutting a source into the segments of a plan.

mod split;

pub use split::{execute, segment_command, SegmentOutcome, TranscodeSettings};
