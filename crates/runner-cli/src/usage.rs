//! Usage guide shown when a run cannot be formed from the arguments

use std::io::{self, Write};

use colored::Colorize;

pub const USAGE_LINE: &str =
    "sync-runner [OPTIONS] <SYNC_FROM> <TOOL> <FLAGS> <FROM> <TO> [<TOOL_LOG> <CLEAN_LOG>]";

pub const ARGUMENT_GUIDE: &str = "\
Required:
  1  SYNC_FROM   Folder that must hold more than 4 MB before syncing
  2  TOOL        Full path of the rsync executable
  3  FLAGS       All rsync flags as one argument, e.g. \"-a --delete-before\"
  4  FROM        rsync source argument (origin)
  5  TO          rsync destination argument

Optional (both or neither):
  6  TOOL_LOG    rsync log file; its deletion lines are moved out, then it is emptied
  7  CLEAN_LOG   File the deletion lines are appended to

Pass rsync's own --log-file=TOOL_LOG in FLAGS when using 6 and 7.";

const EXAMPLE: &str = "\
sync-runner \"/home/me/Music\" /usr/bin/rsync \\
    \"-arv --progress --log-file=/home/me/rsync/music.log --delete-before\" \\
    \"/home/me/Music/\" \"nas:/volume2/Music/\" \\
    /home/me/rsync/music.log /home/me/rsync/music-deleted.txt";

/// Write the full guide to `out`.
pub fn write_guide(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "Usage:".bold())?;
    writeln!(out, "  {USAGE_LINE}")?;
    writeln!(out)?;
    writeln!(out, "{ARGUMENT_GUIDE}")?;
    writeln!(out)?;
    writeln!(out, "{}", "Example:".bold())?;
    writeln!(out, "{EXAMPLE}")?;
    writeln!(out)?;
    writeln!(
        out,
        "SYNC_FROM is measured before anything runs so that an unmounted or empty\n\
         source never turns into a mass deletion at the destination. When the log\n\
         paths are given, deleted items are collected into CLEAN_LOG for easier\n\
         reading and the rsync log is cleared."
    )?;
    writeln!(
        out,
        "Exits 0 on success, 1 if the run was refused or failed, 2 on bad arguments."
    )
}

pub fn print_guide() -> io::Result<()> {
    write_guide(&mut io::stdout().lock())
}

pub fn eprint_guide() -> io::Result<()> {
    write_guide(&mut io::stderr().lock())
}
