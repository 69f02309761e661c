//! sync-runner CLI
//!
//! Measures the sync source, runs rsync, and moves deletion records out of
//! its log.

mod cli;
mod error;
mod presenter;
mod usage;

use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use runner_core::{InvocationSettings, Orchestrator, OrchestratorOptions, Presenter};

use cli::Cli;
use error::Result;
use presenter::TerminalPresenter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let presenter = TerminalPresenter::new(cli.pause);
    presenter.on_start();

    match run(&cli, presenter) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            if e.is_usage() {
                presenter.on_help();
                eprintln!();
                let _ = usage::eprint_guide();
            }
            presenter.pause();
            std::process::exit(e.exit_code());
        }
    }
}

/// Install a stderr subscriber when `--verbose` or `RUST_LOG` asks for one.
///
/// Without either, failures are reported by the presenter alone.
fn init_tracing(verbose: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let Some(directive) = tracing_directive(verbose, env) else {
        return;
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(directive))
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: tracing subscriber already installed");
    }
    tracing::debug!("Verbose mode enabled");
}

/// `RUST_LOG` wins over the verbosity flag; an empty value counts as unset.
fn tracing_directive(verbose: bool, env: Option<String>) -> Option<String> {
    match env.filter(|value| !value.trim().is_empty()) {
        Some(value) => Some(value),
        None if verbose => Some("debug".to_string()),
        None => None,
    }
}

fn run(cli: &Cli, presenter: TerminalPresenter) -> Result<i32> {
    if cli.positionals.is_empty() {
        // Bare invocation is a request for help, not a mistake
        presenter.on_help();
        usage::print_guide()?;
        presenter.pause();
        return Ok(0);
    }

    let settings = InvocationSettings::from_args(&cli.positionals)?;
    let options = OrchestratorOptions {
        settle_delay: Duration::from_secs(cli.settle_secs),
        ..OrchestratorOptions::default()
    };

    let outcome = Orchestrator::new(settings)
        .with_options(options)
        .with_presenter(Box::new(presenter))
        .run();

    if !outcome.is_success() {
        presenter.pause();
    }
    Ok(outcome.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subscriber_without_verbose_or_env() {
        assert_eq!(tracing_directive(false, None), None);
        assert_eq!(tracing_directive(false, Some("  ".into())), None);
    }

    #[test]
    fn verbose_enables_debug() {
        assert_eq!(tracing_directive(true, None).as_deref(), Some("debug"));
    }

    #[test]
    fn rust_log_overrides_verbose() {
        assert_eq!(
            tracing_directive(true, Some("runner_fs=trace".into())).as_deref(),
            Some("runner_fs=trace")
        );
        assert_eq!(
            tracing_directive(false, Some("warn".into())).as_deref(),
            Some("warn")
        );
    }
}
