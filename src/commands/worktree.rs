//! Worktree command - `try .` and `try ./path`
//!
//! Creates a dated directory for a local repository. Git repositories get a
//! detached worktree; anything else gets a plain directory.

use super::date_prefix;
use crate::{
    Result, TryError,
    config::TryConfig,
    output::OutputWriter,
    script::{Script, shell_quote},
};
use chrono::{DateTime, Local};
use regex::Regex;
use std::fs;
use std::path::{self, Path};
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)(\d+)$").expect("trailing number pattern is valid"));

fn is_free(path: &Path) -> bool {
    fs::symlink_metadata(path).is_err()
}

/// Pick a name under `tries` that no dated directory uses yet
///
/// Returns `base` itself when `<date>-<base>` is free. A name ending in
/// digits counts up from that number (`v1` → `v2`); otherwise `-2`, `-3`, …
/// are appended.
#[must_use]
pub fn resolve_unique_name(tries: &Path, date: &str, base: &str) -> String {
    let taken = |name: &str| !is_free(&tries.join(format!("{date}-{name}")));

    if !taken(base) {
        return base.to_string();
    }

    let (stem, mut n, separator) = match TRAILING_NUMBER.captures(base) {
        Some(caps) => match caps[2].parse::<u64>() {
            Ok(number) => (caps[1].to_string(), number.saturating_add(1), ""),
            Err(_) => (base.to_string(), 2, "-"),
        },
        None => (base.to_string(), 2, "-"),
    };

    loop {
        let candidate = format!("{stem}{separator}{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Name for the new directory: the joined words, or the repository's name
fn base_name(repo_dir: &Path, words: &[String]) -> Option<String> {
    let name = if words.is_empty() {
        let resolved = fs::canonicalize(repo_dir).unwrap_or_else(|_| repo_dir.to_path_buf());
        resolved.file_name()?.to_string_lossy().into_owned()
    } else {
        words.join("-")
    };

    let name = name.replace(' ', "-");
    (!name.is_empty()).then_some(name)
}

/// Script creating a dated directory from the repository at `path_arg`
///
/// # Errors
///
/// Returns `TryError::NotADirectory` if `path_arg` is not a directory, or
/// `TryError::InvalidInput` if no directory name can be derived.
pub fn execute(
    config: &TryConfig,
    path_arg: &str,
    words: &[String],
    now: DateTime<Local>,
    output: &dyn OutputWriter,
) -> Result<String> {
    let repo_dir = path::absolute(path_arg)?;
    if !repo_dir.is_dir() {
        return Err(TryError::NotADirectory(path_arg.into()));
    }
    let is_git = repo_dir.join(".git").exists();

    let base = base_name(&repo_dir, words)
        .ok_or_else(|| TryError::InvalidInput(format!("cannot derive a name from {path_arg}")))?;

    fs::create_dir_all(&config.tries_path)?;
    let date = date_prefix(now);
    let name = resolve_unique_name(&config.tries_path, &date, &base);
    let dir = config.tries_path.join(format!("{date}-{name}"));
    tracing::info!(repo = %repo_dir.display(), dir = %dir.display(), is_git, "creating trial");

    if !is_git {
        output.info(&format!(
            "Note: {path_arg} is not a git repository, creating plain directory."
        ));
        return Ok(Script::new().mkdir(&dir).cd(&dir).render());
    }

    Ok(Script::new()
        .mkdir(&dir)
        .echo(&format!(
            "Using git worktree to create this trial from {}.",
            repo_dir.display()
        ))
        .step(format!(
            "(cd {} && git worktree add --detach {} 2>/dev/null || true)",
            shell_quote(&repo_dir.to_string_lossy()),
            shell_quote(&dir.to_string_lossy())
        ))
        .cd(&dir)
        .render())
}
