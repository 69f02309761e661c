//! [`SourceTree`] builder for size-guard scenarios.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory populated with files of chosen sizes.
///
/// Files are created sparse with `set_len`, so multi-megabyte trees cost no
/// real disk space.
///
/// # Example
///
/// ```rust,no_run
/// use runner_test_utils::{MB, SourceTree};
///
/// let tree = SourceTree::new();
/// tree.file("music/album/track.flac", 5 * MB);
/// assert!(tree.path("music/album/track.flac").exists());
/// ```
pub struct SourceTree {
    temp_dir: TempDir,
}

impl Default for SourceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceTree {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of a tree-relative path.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Create a file of exactly `size` bytes, creating parent directories.
    pub fn file(&self, relative: &str, size: u64) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(&path).unwrap().set_len(size).unwrap();
        self
    }

    /// Create an empty directory.
    pub fn dir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.path(relative)).unwrap();
        self
    }
}
