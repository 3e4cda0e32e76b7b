//! External tool detection.
//!
//! vidsplit needs two programs: `ffprobe` to read the media duration and
//! `ffmpeg` to cut segments. Paths come from the config file when set and
//! present on disk, otherwise from `PATH`.

use std::path::{Path, PathBuf};
use std::process::Command;

use vidsplit_common::{Error, Result};

/// Information about an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Name of the tool.
    pub name: String,
    /// Whether the tool is available.
    pub available: bool,
    /// Version string if available.
    pub version: Option<String>,
    /// Path to the tool executable.
    pub path: Option<PathBuf>,
}

/// Check a tool by running `<path> -version` (the ffmpeg family spelling).
pub fn check_tool(name: &str, path: Option<&Path>) -> ToolInfo {
    let program = path.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(name));
    let result = Command::new(&program).arg("-version").output();

    match result {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.to_string());

            let path = match path {
                Some(p) => Some(p.to_path_buf()),
                None => which::which(name).ok(),
            };

            ToolInfo {
                name: name.to_string(),
                available: true,
                version,
                path,
            }
        }
        _ => ToolInfo {
            name: name.to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Require that a tool is on `PATH`, returning its location.
///
/// # Errors
///
/// Returns [`Error::ToolNotFound`] if the tool is not found.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool_not_found(name))
}

/// Get the path to a tool, preferring a configured path over `PATH` lookup.
pub fn get_tool_path(name: &str, config_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        #[cfg(feature = "tracing")]
        tracing::warn!(
            "Configured {name} path {} does not exist; searching PATH",
            path.display()
        );
    }

    require_tool(name)
}

/// Availability of ffmpeg and ffprobe, honouring configured paths.
pub fn check_tools(ffmpeg: Option<&Path>, ffprobe: Option<&Path>) -> Vec<ToolInfo> {
    vec![check_tool("ffmpeg", ffmpeg), check_tool("ffprobe", ffprobe)]
}
