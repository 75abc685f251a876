//! `try` entry point
//!
//! Finds, creates and manages dated experiment directories. The binary never
//! changes the caller's directory itself: it prints a shell script on stdout
//! for the wrapper function installed by `try init` to evaluate.
//!
//! # Usage
//!
//! ```bash
//! # Install the wrapper (add to ~/.bashrc)
//! eval "$(try init bash)"
//!
//! # Interactive selector, optionally seeded with a query
//! try
//! try redis
//!
//! # Clone a repository into a dated directory
//! try clone https://github.com/user/repo
//!
//! # Dated worktree of the current repository
//! try .
//! try . experiment
//!
//! # Show where experiments live
//! try config
//! ```
//!
//! # Configuration
//!
//! `TRY_PATH` and `TRY_PROJECTS` (or `path` and `projects` in
//! `~/.config/try/config.toml` on Linux) choose the tries root and the
//! graduation destination.

use chrono::Local;
use std::process::ExitCode;
use tries::{
    TryError,
    cli::{Cli, Invocation},
    commands,
    config::TryConfig,
    logging,
    output::{OutputWriter, StderrWriter},
    selector::Theme,
};

type Result<T> = std::result::Result<T, TryError>;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let output = StderrWriter::new();

    match run(&cli, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            output.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, output: &dyn OutputWriter) -> Result<()> {
    let invocation = cli.invocation();

    // The wrapper must be printable even when no config can be resolved
    if let Invocation::Init { shell } = &invocation {
        print!("{}", commands::init(shell.as_deref())?);
        return Ok(());
    }

    let config = TryConfig::load()?;
    let _guard = logging::init_tracing(&config.log_filter);
    tracing::debug!(?invocation, tries = %config.tries_path.display(), "starting");

    let script = match invocation {
        Invocation::Select { query } => commands::exec(&config, &query, &Theme::default())?,
        Invocation::Worktree { path, name } => Some(commands::worktree(
            &config,
            &path,
            &name,
            Local::now(),
            output,
        )?),
        Invocation::Clone { url } => Some(commands::clone(&config, &url, Local::now())?),
        Invocation::Config => Some(commands::config(&config)?),
        Invocation::Init { .. } => None,
    };

    if let Some(script) = script {
        print!("{script}");
    }
    Ok(())
}
