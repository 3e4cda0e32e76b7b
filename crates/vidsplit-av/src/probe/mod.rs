//! Media probing.
//!
//! Only two facts about the source are needed: its duration, from ffprobe,
//! and its size on disk.

mod duration;

pub use duration::{parse_duration, probe_duration};

use std::path::Path;

use vidsplit_common::Result;

/// Size of the source file in bytes.
pub fn file_size(path: &Path) -> Result<u64> {
    Ok(std::fs::metadata(path)?.len())
}
