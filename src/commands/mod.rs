//! Command implementations
//!
//! Each command is a module with an `execute` function. Commands that
//! change the caller's shell return the script for the wrapper to evaluate
//! instead of printing it, so `main` owns stdout.

pub mod clone;
pub mod config;
pub mod exec;
pub mod init;
pub mod worktree;

pub use clone::execute as clone;
pub use config::execute as config;
pub use exec::execute as exec;
pub use init::execute as init;
pub use worktree::execute as worktree;

use chrono::{DateTime, Local};

/// `YYYY-MM-DD` prefix for directories created at `now`
#[must_use]
pub fn date_prefix(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%d").to_string()
}
