//! Path utilities for classifying files by extension.
//!
//! The scanner uses these to recognise video files and their companion
//! metadata (`.nfo`) files, and the pipeline uses them to derive the name of
//! the `.vsmeta` sidecar it writes next to each video.

use std::path::Path;

/// Video file extensions recognised by default.
const VIDEO_EXTENSIONS: &[&str] = &["avi", "flv", "mkv", "mov", "mp4", "rmvb", "ts", "wmv"];

/// Extension of the XML metadata files paired with videos.
const METADATA_EXTENSION: &str = "nfo";

/// Extension of the binary sidecar files that are produced.
pub const SIDECAR_EXTENSION: &str = "vsmeta";

/// Canonical extension for artwork saved next to a video.
pub const ARTWORK_EXTENSION: &str = "jpg";

/// Lowercased extension of `path`, without the leading dot.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use avmeta_common::paths::lowercase_extension;
///
/// assert_eq!(lowercase_extension(Path::new("Movie.MKV")).as_deref(), Some("mkv"));
/// assert_eq!(lowercase_extension(Path::new("README")), None);
/// ```
pub fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Check whether the lowercased extension of `path` is one of `extensions`.
///
/// `extensions` are compared without a leading dot and are expected to be
/// lowercase already.
pub fn has_extension_in<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    lowercase_extension(path)
        .map(|ext| extensions.iter().any(|e| e.as_ref() == ext))
        .unwrap_or(false)
}

/// Get the list of default video file extensions.
#[must_use]
pub fn video_extensions() -> &'static [&'static str] {
    VIDEO_EXTENSIONS
}

/// Get the default metadata file extension.
#[must_use]
pub fn metadata_extension() -> &'static str {
    METADATA_EXTENSION
}

/// Name of the sidecar written for `video`: `{number}{.ext}.vsmeta`.
///
/// The video's extension keeps its original casing, so `ABC-123` paired with
/// `movie.MP4` yields `ABC-123.MP4.vsmeta`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use avmeta_common::paths::sidecar_file_name;
///
/// assert_eq!(sidecar_file_name("ABC-123", Path::new("x/abc.mp4")), "ABC-123.mp4.vsmeta");
/// ```
pub fn sidecar_file_name(number: &str, video: &Path) -> String {
    match video.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{number}.{ext}.{SIDECAR_EXTENSION}"),
        None => format!("{number}.{SIDECAR_EXTENSION}"),
    }
}
