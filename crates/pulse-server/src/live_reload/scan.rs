//! Directory snapshots for change detection.
//!
//! A snapshot maps every watched file directly inside the served directory
//! to its modification time. Two consecutive snapshots differing in any way
//! (file added, removed, or touched) means something changed.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Extensions watched by default.
const DEFAULT_EXTENSIONS: &[&str] = &["html", "css", "js", "webmanifest", "json"];

/// Set of file extensions whose changes trigger a reload.
///
/// Matching is case-insensitive on the final extension only.
#[derive(Clone, Debug)]
pub struct WatchedExtensions {
    extensions: Vec<String>,
}

impl WatchedExtensions {
    /// Build a set from extensions given without the leading dot.
    #[must_use]
    pub fn new(extensions: &[&str]) -> Self {
        Self {
            extensions: extensions.iter().map(|e| e.to_ascii_lowercase()).collect(),
        }
    }

    /// Check whether `path` has a watched extension.
    pub fn contains(&self, path: &Path) -> bool {
        let Some(extension) = path.extension() else {
            return false;
        };
        let extension = extension.to_string_lossy();
        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(&extension))
    }
}

impl Default for WatchedExtensions {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

/// Watched file path to last-modified time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    mtimes: BTreeMap<PathBuf, SystemTime>,
}

impl Snapshot {
    /// Number of watched files recorded.
    pub fn len(&self) -> usize {
        self.mtimes.len()
    }

    /// Whether no watched files were found.
    pub fn is_empty(&self) -> bool {
        self.mtimes.is_empty()
    }

    /// Modification time recorded for `path`.
    pub fn get(&self, path: &Path) -> Option<SystemTime> {
        self.mtimes.get(path).copied()
    }
}

/// Error scanning the watched directory.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Listing the directory failed.
    #[error("failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Reading file metadata failed for a reason other than the file vanishing.
    #[error("failed to read metadata for {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Record modification times of watched files directly inside `root`.
///
/// Subdirectories are skipped. A file removed between listing and stat is
/// treated as absent.
pub fn snapshot(root: &Path, extensions: &WatchedExtensions) -> Result<Snapshot, SnapshotError> {
    let read_dir_error = |source| SnapshotError::ReadDir {
        path: root.to_path_buf(),
        source,
    };

    let mut mtimes = BTreeMap::new();
    for entry in fs::read_dir(root).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        if !extensions.contains(&path) {
            continue;
        }

        // Follows symlinks, like a browser fetching the file would.
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(source) => return Err(SnapshotError::Metadata { path, source }),
        };
        if metadata.is_dir() {
            continue;
        }

        let modified = metadata
            .modified()
            .map_err(|source| SnapshotError::Metadata {
                path: path.clone(),
                source,
            })?;
        mtimes.insert(path, modified);
    }

    Ok(Snapshot { mtimes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;

    fn touch(path: &Path, secs: u64) {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    #[test]
    fn test_default_extensions() {
        let extensions = WatchedExtensions::default();
        for name in [
            "index.html",
            "style.css",
            "app.js",
            "site.webmanifest",
            "data.json",
        ] {
            assert!(extensions.contains(Path::new(name)), "{name}");
        }
        assert!(!extensions.contains(Path::new("logo.png")));
        assert!(!extensions.contains(Path::new("notes.md")));
        assert!(!extensions.contains(Path::new("Makefile")));
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let extensions = WatchedExtensions::default();
        assert!(extensions.contains(Path::new("INDEX.HTML")));
        assert!(extensions.contains(Path::new("App.Js")));
    }

    #[test]
    fn test_only_last_extension_counts() {
        let extensions = WatchedExtensions::default();
        assert!(!extensions.contains(Path::new("bundle.js.map")));
        assert!(extensions.contains(Path::new("bundle.min.js")));
    }

    #[test]
    fn test_dotfile_has_no_extension() {
        let extensions = WatchedExtensions::default();
        assert!(!extensions.contains(Path::new(".html")));
    }

    #[test]
    fn test_snapshot_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let snap = snapshot(dir.path(), &WatchedExtensions::default()).unwrap();
        assert!(snap.is_empty());
    }

    #[test]
    fn test_snapshot_records_watched_files_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("index.html"), 10);
        touch(&dir.path().join("style.css"), 20);
        touch(&dir.path().join("logo.png"), 30);

        let snap = snapshot(dir.path(), &WatchedExtensions::default()).unwrap();

        assert_eq!(snap.len(), 2);
        assert_eq!(
            snap.get(&dir.path().join("index.html")),
            Some(SystemTime::UNIX_EPOCH + Duration::from_secs(10))
        );
        assert!(snap.get(&dir.path().join("logo.png")).is_none());
    }

    #[test]
    fn test_snapshot_is_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("assets");
        fs::create_dir(&nested).unwrap();
        touch(&nested.join("app.js"), 10);

        let snap = snapshot(dir.path(), &WatchedExtensions::default()).unwrap();
        assert!(snap.is_empty());
    }

    #[test]
    fn test_snapshot_skips_directory_with_watched_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("vendor.js")).unwrap();

        let snap = snapshot(dir.path(), &WatchedExtensions::default()).unwrap();
        assert!(snap.is_empty());
    }

    #[test]
    fn test_snapshot_detects_add_remove_modify() {
        let dir = tempfile::tempdir().unwrap();
        let extensions = WatchedExtensions::default();
        let index = dir.path().join("index.html");
        touch(&index, 10);
        let base = snapshot(dir.path(), &extensions).unwrap();

        touch(&index, 11);
        let modified = snapshot(dir.path(), &extensions).unwrap();
        assert_ne!(base, modified);

        touch(&index, 10);
        touch(&dir.path().join("app.js"), 10);
        let added = snapshot(dir.path(), &extensions).unwrap();
        assert_ne!(base, added);

        fs::remove_file(dir.path().join("app.js")).unwrap();
        assert_eq!(base, snapshot(dir.path(), &extensions).unwrap());

        fs::remove_file(&index).unwrap();
        let removed = snapshot(dir.path(), &extensions).unwrap();
        assert_ne!(base, removed);
    }

    #[test]
    fn test_unwatched_changes_leave_snapshot_equal() {
        let dir = tempfile::tempdir().unwrap();
        let extensions = WatchedExtensions::default();
        touch(&dir.path().join("index.html"), 10);
        touch(&dir.path().join("notes.txt"), 10);
        let before = snapshot(dir.path(), &extensions).unwrap();

        touch(&dir.path().join("notes.txt"), 99);
        touch(&dir.path().join("photo.jpg"), 99);
        let after = snapshot(dir.path(), &extensions).unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_snapshot_missing_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");

        let err = snapshot(&missing, &WatchedExtensions::default()).unwrap_err();
        assert!(matches!(err, SnapshotError::ReadDir { ref path, .. } if *path == missing));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_omitted() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("missing.js"), dir.path().join("link.js"))
            .unwrap();

        let snap = snapshot(dir.path(), &WatchedExtensions::default()).unwrap();
        assert!(snap.is_empty());
    }
}
