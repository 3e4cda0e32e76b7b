//! Unified error type for vidsplit.
//!
//! Every crate in the workspace funnels its failures into [`Error`]. Each
//! variant is fatal to the run; the binary reports it and terminates with the
//! status returned by [`Error::exit_code`].

use std::path::PathBuf;

use crate::types::ManifestFormat;

/// Error type covering every failure mode of a split run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad or missing options, including non-positive chunk lengths.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The media duration could not be determined from the prober output.
    #[error("cannot determine media length: {0}")]
    MediaProbeFailure(String),

    /// The manifest path does not exist.
    #[error("manifest not found: {}", path.display())]
    ManifestNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The manifest extension is neither `.json` nor `.csv`.
    #[error("unsupported manifest format: {}; file must be a csv or json file", path.display())]
    UnsupportedManifestFormat {
        /// The offending manifest path.
        path: PathBuf,
    },

    /// A manifest record lacks a required field.
    #[error("{format} manifest record {record} is missing required field `{field}`")]
    ManifestFieldMissing {
        /// Name of the missing field.
        field: String,
        /// Manifest flavour the record came from.
        format: ManifestFormat,
        /// One-based record number within the manifest.
        record: usize,
    },

    /// A manifest could not be decoded, or one of its values is unusable.
    #[error("invalid {format} manifest: {message}")]
    ManifestInvalid {
        /// Manifest flavour being parsed.
        format: ManifestFormat,
        /// Human-readable description.
        message: String,
    },

    /// The media fits in a single chunk, so there is nothing to split.
    #[error("media shorter than chunk length ({duration}s <= {chunk_length}s)")]
    DegenerateSplit {
        /// Total media duration in seconds.
        duration: u64,
        /// Requested chunk length in seconds.
        chunk_length: u64,
    },

    /// A required external tool could not be located.
    #[error("tool not found: {tool}; is it installed and in PATH?")]
    ToolNotFound {
        /// Name of the missing tool.
        tool: String,
    },

    /// An external tool (ffmpeg, ffprobe) failed to run or exited non-zero.
    #[error("Tool error [{tool}]: {message}")]
    ExternalToolFailure {
        /// Name of the tool that failed.
        tool: String,
        /// Human-readable error description.
        message: String,
    },

    /// The configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Map this error to the process exit status reported by the binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) | Error::Config(_) => 2,
            Error::MediaProbeFailure(_) => 3,
            Error::ManifestNotFound { .. }
            | Error::UnsupportedManifestFormat { .. }
            | Error::ManifestFieldMissing { .. }
            | Error::ManifestInvalid { .. } => 4,
            Error::DegenerateSplit { .. } => 5,
            Error::ToolNotFound { .. } | Error::ExternalToolFailure { .. } => 6,
            Error::Io(_) => 1,
        }
    }

    /// The expected manifest layout, for errors caused by a malformed record.
    pub fn schema_hint(&self) -> Option<&'static str> {
        match self {
            Error::ManifestFieldMissing { format, .. } | Error::ManifestInvalid { format, .. } => {
                Some(format.schema())
            }
            _ => None,
        }
    }

    /// Convenience constructor for [`Error::InvalidArgument`].
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Convenience constructor for [`Error::ExternalToolFailure`].
    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ExternalToolFailure {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::ToolNotFound`].
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Error::ToolNotFound { tool: tool.into() }
    }

    /// Convenience constructor for [`Error::ManifestFieldMissing`].
    pub fn field_missing(field: impl Into<String>, format: ManifestFormat, record: usize) -> Self {
        Error::ManifestFieldMissing {
            field: field.into(),
            format,
            record,
        }
    }

    /// Convenience constructor for [`Error::ManifestInvalid`].
    pub fn manifest_invalid(format: ManifestFormat, message: impl Into<String>) -> Self {
        Error::ManifestInvalid {
            format,
            message: message.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
