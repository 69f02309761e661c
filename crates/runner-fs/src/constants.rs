//! Units, thresholds and markers shared by the guard and the reconciler.

/// Bytes per kilobyte.
pub const BYTES_IN_KB: u64 = 1024;

/// Kilobytes per megabyte.
pub const KB_IN_MB: u64 = BYTES_IN_KB;

/// A source must measure strictly more than this many KB to be synced.
pub const MIN_SOURCE_SIZE_KB: u64 = 4 * KB_IN_MB;

/// Substring (matched case-insensitively) that marks a deletion record.
pub const DELETION_MARKER: &str = "deleting";

/// Windows shell metadata files that never count towards the source size.
pub const EXCLUDED_FILE_NAMES: &[&str] = &["Thumbs.db"];

/// Extension suffixes that never count towards the source size.
pub const EXCLUDED_SUFFIXES: &[&str] = &[".ini"];

/// Line terminator written to the clean log.
#[cfg(windows)]
pub const LINE_ENDING: &[u8] = b"\r\n";

/// Line terminator written to the clean log.
#[cfg(not(windows))]
pub const LINE_ENDING: &[u8] = b"\n";
