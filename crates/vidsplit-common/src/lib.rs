//! vidsplit-common: shared types, path helpers, and the error type.
//!
//! - **Plan types**: [`Segment`], [`Plan`] and [`TimeValue`], the common
//!   currency between the planner, the manifest parser and the executor
//! - **Path utilities**: output naming derived from the source file
//! - **Error handling**: the unified [`Error`] and its exit-code mapping

pub mod error;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use paths::SourceName;
pub use types::*;
