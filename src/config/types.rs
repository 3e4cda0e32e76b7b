use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use vidsplit_plan::{ChunkStrategy, DEFAULT_FILESIZE_FACTOR};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub split: SplitConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Path to ffmpeg (searched on PATH when unset)
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Path to ffprobe (searched on PATH when unset)
    #[serde(default)]
    pub ffprobe_path: Option<PathBuf>,
}

/// Defaults for split runs. Command-line flags win over these.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SplitConfig {
    #[serde(default = "default_codec")]
    pub vcodec: String,

    #[serde(default = "default_codec")]
    pub acodec: String,

    /// Extra ffmpeg options inserted before the seek options
    #[serde(default)]
    pub extra: Vec<String>,

    #[serde(default = "default_filesize_factor")]
    pub filesize_factor: f64,

    #[serde(default)]
    pub chunk_strategy: ChunkStrategy,

    /// Pass `-y` to ffmpeg in chunk mode so a re-run replaces earlier
    /// chunks. Manifest mode always overwrites.
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

fn default_codec() -> String {
    "copy".to_string()
}

fn default_overwrite() -> bool {
    true
}

fn default_filesize_factor() -> f64 {
    DEFAULT_FILESIZE_FACTOR
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            vcodec: default_codec(),
            acodec: default_codec(),
            extra: Vec::new(),
            filesize_factor: default_filesize_factor(),
            chunk_strategy: ChunkStrategy::default(),
            overwrite: default_overwrite(),
        }
    }
}
