//! Mission-based integration tests
//!
//! Each test plays out a realistic sequence of scheduled runs against one
//! source folder and one pair of log files.

#![cfg(unix)]

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;
use runner_core::{InvocationSettings, Orchestrator, OrchestratorOptions, Stage};
use runner_test_utils::{MB, SourceTree, StubTool, logs};
use tempfile::TempDir;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// A music library, a backup target and the rsync log files of a nightly job
struct NightlyJob {
    library: SourceTree,
    work: TempDir,
}

impl NightlyJob {
    fn new() -> Self {
        let library = SourceTree::new();
        library
            .file("Artist A/Album 1/01.flac", 3 * MB)
            .file("Artist A/Album 1/desktop.ini", 1024)
            .file("Artist B/Album 2/01.flac", 3 * MB)
            .file("Thumbs.db", 64 * 1024);
        Self {
            library,
            work: TempDir::new().unwrap(),
        }
    }

    fn tool_log(&self) -> PathBuf {
        self.work.path().join("music-sync.log")
    }

    fn clean_log(&self) -> PathBuf {
        self.work.path().join("music-sync-clean.txt")
    }

    /// Run the binary once with a stub rsync that writes `log_lines`.
    fn run_binary(&self, exit_code: i32, log_lines: &[&str]) -> assert_cmd::assert::Assert {
        let tool = StubTool::exiting(exit_code)
            .appending_log(self.tool_log(), log_lines)
            .build(self.work.path());

        Command::cargo_bin("sync-runner")
            .unwrap()
            .env("NO_COLOR", "1")
            .args(["--settle-secs", "0"])
            .arg(self.library.root())
            .arg(&tool)
            .arg(format!("-a --delete-before --log-file={}", self.tool_log().display()))
            .arg(self.library.root())
            .arg(self.work.path().join("backup"))
            .arg(self.tool_log())
            .arg(self.clean_log())
            .assert()
    }
}

fn no_delay() -> OrchestratorOptions {
    OrchestratorOptions {
        settle_delay: Duration::ZERO,
        ..OrchestratorOptions::default()
    }
}

// =============================================================================
// Missions
// =============================================================================

#[test]
fn mission_clean_log_accumulates_across_nights() {
    let job = NightlyJob::new();

    job.run_binary(0, &["*deleting Artist C/old.flac", "Artist A/Album 1/01.flac"])
        .success();
    job.run_binary(0, &["sent 120 bytes  received 12 bytes"]).success();
    job.run_binary(0, &["*deleting Artist B/Album 2/cover.jpg"]).success();

    assert_eq!(
        logs::read_lines(&job.clean_log()),
        vec![
            "*deleting Artist C/old.flac",
            "*deleting Artist B/Album 2/cover.jpg"
        ]
    );
    assert_eq!(fs::metadata(job.tool_log()).unwrap().len(), 0);
}

#[test]
fn mission_unmounted_library_is_refused_and_logs_untouched() {
    let job = NightlyJob::new();
    job.run_binary(0, &["*deleting Artist C/old.flac"]).success();

    // The library volume disappears: only shell metadata is left behind
    fs::remove_dir_all(job.library.path("Artist A")).unwrap();
    fs::remove_dir_all(job.library.path("Artist B")).unwrap();
    logs::write_lines(&job.tool_log(), &["deleting left over from a manual run"]);

    job.run_binary(0, &["*deleting Artist A/Album 1/01.flac"])
        .code(1)
        .stderr(predicate::str::contains("The folder is ~< 4 MB"));

    assert_eq!(
        logs::read_lines(&job.tool_log()),
        vec!["deleting left over from a manual run"]
    );
    assert_eq!(
        logs::read_lines(&job.clean_log()),
        vec!["*deleting Artist C/old.flac"]
    );
}

#[test]
fn mission_failed_transfer_keeps_log_for_next_night() {
    let job = NightlyJob::new();

    job.run_binary(23, &["*deleting Artist C/old.flac", "rsync error: some files could not be transferred"])
        .code(1);
    assert!(!job.clean_log().exists());

    job.run_binary(0, &["*deleting Artist D/older.flac"]).success();

    assert_eq!(
        logs::read_lines(&job.clean_log()),
        vec!["*deleting Artist C/old.flac", "*deleting Artist D/older.flac"]
    );
}

#[test]
fn mission_library_api_matches_binary() {
    let job = NightlyJob::new();
    let tool = StubTool::exiting(0)
        .appending_log(job.tool_log(), &["*DELETING Artist C/old.flac"])
        .build(job.work.path());
    let settings = InvocationSettings::new(
        job.library.root(),
        tool,
        "-a --delete-before",
        job.library.root().to_string_lossy(),
        "nas:/music/",
    )
    .unwrap()
    .with_log_paths(job.tool_log(), job.clean_log())
    .unwrap();

    let outcome = Orchestrator::new(settings).with_options(no_delay()).run();

    assert!(outcome.is_success());
    assert_eq!(outcome.report().trace.last(), Some(&Stage::Done));
    let verdict = outcome.report().verdict.unwrap();
    assert_eq!(verdict.shallow_kb, 0, "Thumbs.db must not count");
    assert_eq!(verdict.recursive_kb, Some(6 * 1024));
    assert_eq!(
        logs::read_lines(&job.clean_log()),
        vec!["*DELETING Artist C/old.flac"]
    );
}
