//! Directory matcher.
//!
//! Walks a tree and pairs every video with every metadata file that shares
//! its directory. A directory holding two videos and two NFO files yields
//! four pairings; nothing tries to guess which NFO belongs to which video.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use avmeta_common::paths::has_extension_in;
use avmeta_common::{Error, FileTriple, Result};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::ConvertConfig;

/// Which files count as videos and which as metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRules {
    /// Lowercase, without the dot.
    pub video_extensions: Vec<String>,
    /// Lowercase, without the dot.
    pub metadata_extension: String,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self::from(&ConvertConfig::default())
    }
}

impl From<&ConvertConfig> for MatchRules {
    fn from(config: &ConvertConfig) -> Self {
        Self {
            video_extensions: config.video_extensions.clone(),
            metadata_extension: config.metadata_extension.clone(),
        }
    }
}

impl MatchRules {
    fn is_video(&self, path: &Path) -> bool {
        has_extension_in(path, &self.video_extensions)
    }

    fn is_metadata(&self, path: &Path) -> bool {
        has_extension_in(path, std::slice::from_ref(&self.metadata_extension))
    }
}

/// A subtree that could not be read. Its siblings were still scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Everything a scan found.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Pairings, grouped by directory in path order.
    pub triples: Vec<FileTriple>,
    pub failures: Vec<ScanFailure>,
}

/// Files of one directory, split by role.
#[derive(Default)]
struct Listing {
    videos: Vec<PathBuf>,
    metadata: Vec<PathBuf>,
}

/// Scan `root` recursively and pair videos with metadata files.
///
/// Fails only when `root` itself cannot be read. Unreadable subdirectories
/// are reported in [`ScanOutcome::failures`].
pub fn scan(root: &Path, rules: &MatchRules) -> Result<ScanOutcome> {
    info!("Scanning directory: {:?}", root);

    let mut listings: BTreeMap<PathBuf, Listing> = BTreeMap::new();
    let mut failures = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                if err.depth() == 0 {
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                    return Err(Error::read_dir(path, source));
                }
                debug!(path = %path.display(), error = %err, "Skipping unreadable entry");
                failures.push(ScanFailure {
                    path,
                    message: err.to_string(),
                });
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(dir) = path.parent() else {
            continue;
        };

        if rules.is_video(path) {
            listings
                .entry(dir.to_path_buf())
                .or_default()
                .videos
                .push(path.to_path_buf());
        } else if rules.is_metadata(path) {
            listings
                .entry(dir.to_path_buf())
                .or_default()
                .metadata
                .push(path.to_path_buf());
        }
    }

    let triples: Vec<FileTriple> = listings
        .into_iter()
        .flat_map(|(dir, listing)| pair(dir, listing))
        .collect();

    debug!(
        triples = triples.len(),
        failures = failures.len(),
        "Scan complete"
    );

    Ok(ScanOutcome { triples, failures })
}

/// Cross product of one directory's metadata files and videos.
fn pair(dir: PathBuf, listing: Listing) -> Vec<FileTriple> {
    let mut triples = Vec::with_capacity(listing.videos.len() * listing.metadata.len());
    for nfo in &listing.metadata {
        for video in &listing.videos {
            triples.push(FileTriple::new(nfo.clone(), video.clone(), dir.clone()));
        }
    }
    triples
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    fn names(triples: &[FileTriple]) -> Vec<(String, String)> {
        triples
            .iter()
            .map(|t| {
                (
                    t.nfo.file_name().unwrap().to_string_lossy().into_owned(),
                    t.video.file_name().unwrap().to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    #[test]
    fn test_single_pair() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("movie.mkv"));
        touch(&dir.path().join("movie.nfo"));
        touch(&dir.path().join("notes.txt"));

        let outcome = scan(dir.path(), &MatchRules::default()).unwrap();
        assert_eq!(outcome.triples.len(), 1);
        assert!(outcome.failures.is_empty());

        let triple = &outcome.triples[0];
        assert_eq!(triple.nfo, dir.path().join("movie.nfo"));
        assert_eq!(triple.video, dir.path().join("movie.mkv"));
        assert_eq!(triple.dir, dir.path());
    }

    #[test]
    fn test_cross_product() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.mp4"));
        touch(&dir.path().join("b.MKV"));
        touch(&dir.path().join("a.nfo"));
        touch(&dir.path().join("b.NFO"));

        let outcome = scan(dir.path(), &MatchRules::default()).unwrap();
        assert_eq!(
            names(&outcome.triples),
            vec![
                ("a.nfo".to_string(), "a.mp4".to_string()),
                ("a.nfo".to_string(), "b.MKV".to_string()),
                ("b.NFO".to_string(), "a.mp4".to_string()),
                ("b.NFO".to_string(), "b.MKV".to_string()),
            ]
        );
    }

    #[test]
    fn test_pairs_stay_within_directory() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("top.nfo"));
        touch(&dir.path().join("one/movie.avi"));
        touch(&dir.path().join("one/movie.nfo"));
        touch(&dir.path().join("one/two/clip.ts"));
        touch(&dir.path().join("two/only.nfo"));

        let outcome = scan(dir.path(), &MatchRules::default()).unwrap();
        assert_eq!(outcome.triples.len(), 1);
        assert_eq!(outcome.triples[0].dir, dir.path().join("one"));
    }

    #[test]
    fn test_recurses_into_unmatched_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("empty/deeper/x.wmv"));
        touch(&dir.path().join("empty/deeper/x.nfo"));

        let outcome = scan(dir.path(), &MatchRules::default()).unwrap();
        assert_eq!(outcome.triples.len(), 1);
    }

    #[test]
    fn test_custom_rules() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("movie.mkv"));
        touch(&dir.path().join("movie.webm"));
        touch(&dir.path().join("movie.xml"));
        touch(&dir.path().join("movie.nfo"));

        let rules = MatchRules {
            video_extensions: vec!["webm".into()],
            metadata_extension: "xml".into(),
        };
        let outcome = scan(dir.path(), &rules).unwrap();
        assert_eq!(
            names(&outcome.triples),
            vec![("movie.xml".to_string(), "movie.webm".to_string())]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_link_is_reported_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("ok/movie.mp4"));
        touch(&dir.path().join("ok/movie.nfo"));
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("broken")).unwrap();

        let outcome = scan(dir.path(), &MatchRules::default()).unwrap();
        assert_eq!(names(&outcome.triples), vec![("movie.nfo".to_string(), "movie.mp4".to_string())]);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].path, dir.path().join("broken"));
        assert!(!outcome.failures[0].message.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_link_loop_is_reported_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a/clip.ts"));
        touch(&dir.path().join("a/clip.nfo"));
        std::os::unix::fs::symlink(dir.path(), dir.path().join("a/back")).unwrap();

        let outcome = scan(dir.path(), &MatchRules::default()).unwrap();
        assert_eq!(outcome.triples.len(), 1);
        assert_eq!(outcome.triples[0].dir, dir.path().join("a"));
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].path, dir.path().join("a/back"));
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan(&dir.path().join("nope"), &MatchRules::default()).unwrap_err();
        assert!(matches!(err, Error::ReadDir { .. }));
    }

    #[test]
    fn test_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = scan(dir.path(), &MatchRules::default()).unwrap();
        assert!(outcome.triples.is_empty());
        assert!(outcome.failures.is_empty());
    }
}
