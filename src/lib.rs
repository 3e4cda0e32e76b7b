//! vidsplit - split a video into chunks or manifest-defined segments
//!
//! This library crate exposes the binary's pieces for integration testing.

pub mod cli;
pub mod config;
pub mod options;
pub mod run;
