//! Transfer-log fixtures.

use std::fs;
use std::path::Path;

/// A short rsync-style transfer log with two deletion records.
pub const SAMPLE_LINES: &[&str] = &["Deleting old.txt", "Transferred new.txt", "deleting cache.tmp"];

/// The deletion records of [`SAMPLE_LINES`], in order.
pub const SAMPLE_DELETIONS: &[&str] = &["Deleting old.txt", "deleting cache.tmp"];

/// Write `lines` to `path`, each terminated by `\n`.
pub fn write_lines(path: &Path, lines: &[&str]) {
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(path, content).unwrap();
}

/// Read `path` back as lines; a missing file reads as no lines.
pub fn read_lines(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => content.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}
