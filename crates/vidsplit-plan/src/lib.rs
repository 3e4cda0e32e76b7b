//! # vidsplit-plan
//!
//! Turns a split request into a [`Plan`]:
//!
//! - [`planner`] computes fixed-length chunks from the media duration, with
//!   the chunk length given directly or derived from a chunk count or a
//!   target file size.
//! - [`manifest`] reads named segments from a JSON or CSV manifest.
//!
//! ## Example
//!
//! ```
//! use std::path::Path;
//! use vidsplit_common::SourceName;
//! use vidsplit_plan::plan_by_seconds;
//!
//! let source = SourceName::from_path(Path::new("video.mp4"))?;
//! let plan = plan_by_seconds(&source, 25, 10)?;
//! assert_eq!(plan.len(), 3);
//! # Ok::<(), vidsplit_common::Error>(())
//! ```

pub mod manifest;
pub mod planner;

pub use manifest::{parse_manifest, ManifestRecord, Span};
pub use planner::{
    plan_by_seconds, resolve_chunk_length, ChunkStrategy, SizingOptions,
    DEFAULT_FILESIZE_FACTOR,
};
pub use vidsplit_common::Plan;
