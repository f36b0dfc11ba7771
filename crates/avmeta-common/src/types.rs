//! Core types shared between the scanner and the conversion pipeline.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// A matched (metadata file, video file, directory) grouping.
///
/// Produced once per pairing by the scanner and consumed exactly once by a
/// pipeline worker. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileTriple {
    /// Path of the `.nfo` metadata file.
    pub nfo: PathBuf,
    /// Path of the video file the sidecar describes.
    pub video: PathBuf,
    /// Directory containing both files; the sidecar is written here.
    pub dir: PathBuf,
}

impl FileTriple {
    /// Pair `video` with `nfo`, both living in `dir`.
    pub fn new(nfo: PathBuf, video: PathBuf, dir: PathBuf) -> Self {
        Self { nfo, video, dir }
    }

    /// File name of the metadata file, for log lines.
    pub fn nfo_name(&self) -> String {
        file_name_lossy(&self.nfo)
    }
}

fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
