//! Transfer-log reconciliation
//!
//! After a successful sync the tool's transfer log is reduced to its
//! deletion records: those lines are appended to a cumulative clean log and
//! the transfer log is truncated so the next run starts empty.
//!
//! The two files are not updated atomically. The clean log is synced to disk
//! before the transfer log is truncated, so a crash in between can only
//! duplicate records on the next run, never lose them.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use fs2::FileExt;

use crate::constants::{DELETION_MARKER, LINE_ENDING};
use crate::{Error, Result};

/// Line counts from one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Lines read from the transfer log
    pub lines_scanned: usize,
    /// Lines appended to the clean log
    pub lines_retained: usize,
}

/// Whether a raw log line records a deletion.
pub fn is_deletion_line(line: &[u8]) -> bool {
    let marker = DELETION_MARKER.as_bytes();
    line.len() >= marker.len()
        && line
            .windows(marker.len())
            .any(|window| window.eq_ignore_ascii_case(marker))
}

/// Moves deletion records from a transfer log into a clean log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReconciler;

impl LogReconciler {
    pub fn new() -> Self {
        Self
    }

    /// Append the deletion lines of `tool_log` to `clean_log`, then empty
    /// `tool_log`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer log cannot be read or truncated, or
    /// the clean log cannot be opened, locked or written. A failure before
    /// the append leaves both files untouched.
    pub fn reconcile(&self, tool_log: &Path, clean_log: &Path) -> Result<ReconcileReport> {
        let (retained, lines_scanned) = read_deletions(tool_log)?;

        append_lines(clean_log, &retained)?;
        truncate(tool_log)?;

        let report = ReconcileReport {
            lines_scanned,
            lines_retained: retained.len(),
        };
        tracing::info!(
            tool_log = %tool_log.display(),
            clean_log = %clean_log.display(),
            scanned = report.lines_scanned,
            retained = report.lines_retained,
            "Reconciled transfer log"
        );

        Ok(report)
    }
}

/// Read the whole log, keeping deletion lines without their terminators.
///
/// The reader is dropped before returning so the same path can be reopened
/// for truncation.
fn read_deletions(path: &Path) -> Result<(Vec<Vec<u8>>, usize)> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut reader = BufReader::new(file);

    let mut retained = Vec::new();
    let mut scanned = 0;
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| Error::io(path, e))?;
        if read == 0 {
            break;
        }
        scanned += 1;

        let content = strip_line_ending(&line);
        if is_deletion_line(content) {
            retained.push(content.to_vec());
        }
    }

    Ok((retained, scanned))
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn append_lines(path: &Path, lines: &[Vec<u8>]) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    // Released when `file` drops.
    file.try_lock_exclusive().map_err(|source| Error::LockFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let mut buf = Vec::with_capacity(lines.iter().map(|l| l.len() + LINE_ENDING.len()).sum());
    for line in lines {
        buf.extend_from_slice(line);
        buf.extend_from_slice(LINE_ENDING);
    }

    file.write_all(&buf).map_err(|e| Error::io(path, e))?;
    file.sync_all().map_err(|e| Error::io(path, e))?;

    Ok(())
}

fn truncate(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;
    file.sync_all().map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletion_marker_matches_any_case() {
        assert!(is_deletion_line(b"deleting old.txt"));
        assert!(is_deletion_line(b"2024/01/01 12:00:00 [42] *DELETING music/a.mp3"));
        assert!(is_deletion_line(b"DeLeTiNg x"));
    }

    #[test]
    fn other_lines_do_not_match() {
        assert!(!is_deletion_line(b""));
        assert!(!is_deletion_line(b"delet"));
        assert!(!is_deletion_line(b"Transferred new.txt"));
        assert!(!is_deletion_line(b"deleted old.txt"));
    }

    #[test]
    fn non_utf8_lines_are_matched_bytewise() {
        assert!(is_deletion_line(b"deleting caf\xe9.txt"));
    }

    #[test]
    fn strip_handles_both_terminators() {
        assert_eq!(strip_line_ending(b"a\r\n"), b"a");
        assert_eq!(strip_line_ending(b"a\n"), b"a");
        assert_eq!(strip_line_ending(b"a"), b"a");
        assert_eq!(strip_line_ending(b"\n"), b"");
    }
}
