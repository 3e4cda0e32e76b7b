//! Output naming derived from the source file name.
//!
//! The source path is split at the last `.` of its file name into a base
//! (directory included) and an extension. Chunk outputs land next to the
//! source; manifest outputs are named by the manifest and keep the source
//! extension.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A source path split into base and extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceName {
    base: PathBuf,
    ext: String,
}

impl SourceName {
    /// Split `path` at the last `.` of its file name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the file name has no extension,
    /// since every output name reuses it.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use vidsplit_common::paths::SourceName;
    ///
    /// let name = SourceName::from_path(Path::new("/media/video.mp4")).unwrap();
    /// assert_eq!(name.extension(), "mp4");
    /// assert_eq!(name.chunk_output(0, 3), Path::new("/media/video-1-of-3.mp4"));
    /// ```
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "no . in input file name: {}",
                    path.display()
                ))
            })?;

        Ok(Self {
            base: path.with_extension(""),
            ext: ext.to_string(),
        })
    }

    /// The source extension, without the dot.
    pub fn extension(&self) -> &str {
        &self.ext
    }

    /// `<base>-<index+1>-of-<count>.<ext>`
    pub fn chunk_output(&self, index: u64, count: u64) -> PathBuf {
        let mut name = self.base.clone().into_os_string();
        name.push(format!("-{}-of-{}.{}", index + 1, count, self.ext));
        PathBuf::from(name)
    }

    /// Output path for a manifest `rename_to` value.
    ///
    /// A trailing `.<ext>` matching the source extension is dropped before the
    /// extension is appended, so `part1` and `part1.mp4` both become
    /// `part1.mp4`.
    pub fn manifest_output(&self, rename_to: &str) -> PathBuf {
        let suffix = format!(".{}", self.ext);
        let base = rename_to.strip_suffix(suffix.as_str()).unwrap_or(rename_to);
        PathBuf::from(format!("{base}.{}", self.ext))
    }
}
