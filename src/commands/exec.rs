//! Exec command - run the interactive selector

use crate::{
    Result,
    config::TryConfig,
    entry,
    script::{self, EmitContext},
    selector::{self, Selector, SelectorContext, Theme},
};
use chrono::{DateTime, Local};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Build the selector context for a run starting at `now`
#[must_use]
pub fn selector_context(config: &TryConfig, now: DateTime<Local>) -> SelectorContext {
    SelectorContext {
        tries_path: config.tries_path.clone(),
        projects_path: config.projects_path.clone(),
        home: dirs::home_dir(),
        now,
    }
}

/// Run the selector seeded with `query` and return the script to evaluate
///
/// # Errors
///
/// Returns `TryError::IoError` if the tries root cannot be created or read,
/// or the terminal cannot be driven.
pub fn execute(config: &TryConfig, query: &str, theme: &Theme) -> Result<Option<String>> {
    fs::create_dir_all(&config.tries_path)?;
    let entries = entry::load_entries(&config.tries_path)?;

    let ctx = selector_context(config, Local::now());
    let outcome = selector::terminal::run(Selector::new(entries, query, ctx), theme)?;

    let emit = EmitContext {
        tries_path: config.tries_path.clone(),
        cwd: env::var_os("PWD").map(PathBuf::from),
    };
    Ok(script::render(&outcome, &emit))
}
