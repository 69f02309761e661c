//! CLI argument parsing using clap derive

use clap::Parser;

use crate::usage;

/// Guarded rsync launcher - refuses to sync from a source that looks empty
#[derive(Parser, Debug)]
#[command(name = "sync-runner")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = usage::USAGE_LINE)]
#[command(after_long_help = usage::ARGUMENT_GUIDE)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Wait for Enter before exiting after a failure or the usage guide
    #[arg(long, env = "SYNC_RUNNER_PAUSE")]
    pub pause: bool,

    /// Seconds to wait after the sync before cleaning the log
    #[arg(long, value_name = "SECS", default_value_t = 3, env = "SYNC_RUNNER_SETTLE_SECS")]
    pub settle_secs: u64,

    /// SYNC_FROM TOOL FLAGS FROM TO [TOOL_LOG CLEAN_LOG]
    ///
    /// Taken verbatim from the first positional on, so FLAGS may start
    /// with '-'.
    #[arg(
        value_name = "ARGS",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub positionals: Vec<String>,
}
