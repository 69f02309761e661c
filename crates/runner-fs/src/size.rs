//! Source directory size heuristic
//!
//! An unmounted or emptied source volume looks, to the sync tool, like a
//! request to delete everything at the destination. [`SizeGuard`] measures
//! the source before a run and refuses to pass anything that is not
//! comfortably larger than a fixed threshold.
//!
//! Measurement is two-pass: the files directly inside the directory are
//! summed first, and only if that total is at or below the threshold is the
//! whole tree walked.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::constants::{BYTES_IN_KB, EXCLUDED_FILE_NAMES, EXCLUDED_SUFFIXES, MIN_SOURCE_SIZE_KB};
use crate::{Error, Result};

/// File names that are left out of every measurement.
///
/// Matching is on the file name only and ignores ASCII case, so
/// `Desktop.INI` and `thumbs.db` are excluded just like their canonical
/// spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionPolicy {
    names: Vec<String>,
    suffixes: Vec<String>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self {
            names: EXCLUDED_FILE_NAMES.iter().map(|s| s.to_string()).collect(),
            suffixes: EXCLUDED_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ExclusionPolicy {
    /// A policy that counts every regular file.
    pub fn none() -> Self {
        Self {
            names: Vec::new(),
            suffixes: Vec::new(),
        }
    }

    /// Whether a file with this name is left out of the size total.
    pub fn is_excluded(&self, file_name: &OsStr) -> bool {
        let name = file_name.to_string_lossy();
        let lower = name.to_ascii_lowercase();

        self.names.iter().any(|n| n.eq_ignore_ascii_case(&name))
            || self
                .suffixes
                .iter()
                .any(|s| lower.ends_with(&s.to_ascii_lowercase()))
    }
}

/// Outcome of a [`SizeGuard`] check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeVerdict {
    /// Threshold the measurements were compared against, in KB
    pub threshold_kb: u64,
    /// Size of the files directly inside the directory, in KB
    pub shallow_kb: u64,
    /// Size of the whole tree, in KB; `None` when the walk was not needed
    pub recursive_kb: Option<u64>,
}

impl SizeVerdict {
    /// Verdict for a source that was never supplied.
    pub fn closed(threshold_kb: u64) -> Self {
        Self {
            threshold_kb,
            shallow_kb: 0,
            recursive_kb: None,
        }
    }

    /// True if either measurement exceeds the threshold.
    pub fn passed(&self) -> bool {
        self.shallow_kb > self.threshold_kb
            || self.recursive_kb.is_some_and(|kb| kb > self.threshold_kb)
    }

    /// Largest size measured.
    pub fn measured_kb(&self) -> u64 {
        self.recursive_kb.unwrap_or(0).max(self.shallow_kb)
    }
}

/// Pass/fail gate on the size of a sync source.
#[derive(Debug, Clone)]
pub struct SizeGuard {
    threshold_kb: u64,
    exclusions: ExclusionPolicy,
}

impl Default for SizeGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl SizeGuard {
    /// Guard with the standard 4 MB threshold and default exclusions.
    pub fn new() -> Self {
        Self {
            threshold_kb: MIN_SOURCE_SIZE_KB,
            exclusions: ExclusionPolicy::default(),
        }
    }

    pub fn with_threshold_kb(mut self, threshold_kb: u64) -> Self {
        self.threshold_kb = threshold_kb;
        self
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionPolicy) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn threshold_kb(&self) -> u64 {
        self.threshold_kb
    }

    /// Measure `path` and compare it against the threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not exist, is not a directory, or
    /// cannot be enumerated.
    pub fn verify(&self, path: &Path) -> Result<SizeVerdict> {
        let meta = fs::metadata(path).map_err(|e| Error::io(path, e))?;
        if !meta.is_dir() {
            return Err(Error::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        let shallow_kb = self.shallow_size_kb(path)?;
        tracing::debug!(path = %path.display(), shallow_kb, "Measured top-level files");

        let mut verdict = SizeVerdict {
            threshold_kb: self.threshold_kb,
            shallow_kb,
            recursive_kb: None,
        };

        if shallow_kb <= self.threshold_kb {
            let recursive_kb = self.recursive_size_kb(path)?;
            tracing::debug!(path = %path.display(), recursive_kb, "Measured full tree");
            verdict.recursive_kb = Some(recursive_kb);
        }

        if !verdict.passed() {
            tracing::warn!(
                path = %path.display(),
                measured_kb = verdict.measured_kb(),
                threshold_kb = self.threshold_kb,
                "Source is below the size threshold"
            );
        }

        Ok(verdict)
    }

    /// Like [`verify`](Self::verify), but an absent path fails closed.
    pub fn verify_optional(&self, path: Option<&Path>) -> Result<SizeVerdict> {
        match path {
            Some(path) => self.verify(path),
            None => Ok(SizeVerdict::closed(self.threshold_kb)),
        }
    }

    /// Size in KB of the regular files directly inside `path`.
    pub fn shallow_size_kb(&self, path: &Path) -> Result<u64> {
        let entries = fs::read_dir(path).map_err(|e| Error::io(path, e))?;

        let mut total: u64 = 0;
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(path, e))?;
            let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
            if !file_type.is_file() || self.exclusions.is_excluded(&entry.file_name()) {
                continue;
            }
            let len = entry
                .metadata()
                .map_err(|e| Error::io(entry.path(), e))?
                .len();
            total = total.saturating_add(len);
        }

        Ok(total / BYTES_IN_KB)
    }

    /// Size in KB of every regular file under `path`, at any depth.
    ///
    /// Symbolic links are not followed.
    pub fn recursive_size_kb(&self, path: &Path) -> Result<u64> {
        let mut total: u64 = 0;

        for entry in WalkDir::new(path).min_depth(1).follow_links(false) {
            let entry = entry.map_err(|e| {
                let at = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from(path));
                Error::io(at, e.into())
            })?;

            if !entry.file_type().is_file() || self.exclusions.is_excluded(entry.file_name()) {
                continue;
            }
            let len = entry
                .metadata()
                .map_err(|e| Error::io(entry.path(), e.into()))?
                .len();
            total = total.saturating_add(len);
        }

        Ok(total / BYTES_IN_KB)
    }
}
