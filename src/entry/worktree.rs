//! Git worktree detection
//!
//! A linked worktree has a `.git` file instead of a directory. The file holds
//! a single `gitdir: <repo>/.git/worktrees/<name>` line pointing back into the
//! main repository.

use std::fs;
use std::path::{Component, Path};

/// Name of the repository a worktree's `.git` file points at
///
/// Returns `None` if the file is unreadable or has no `gitdir:` line.
#[must_use]
pub fn source_repo_of(git_file: &Path) -> Option<String> {
    let contents = fs::read_to_string(git_file).ok()?;
    let gitdir = contents
        .lines()
        .find_map(|line| line.strip_prefix("gitdir:"))?
        .trim();

    repo_name_from_gitdir(Path::new(gitdir))
}

/// `/src/repo/.git/worktrees/x` -> `repo`
fn repo_name_from_gitdir(gitdir: &Path) -> Option<String> {
    let components: Vec<Component<'_>> = gitdir.components().collect();
    let git_idx = components
        .iter()
        .rposition(|c| c.as_os_str() == ".git")?;

    components
        .get(git_idx.checked_sub(1)?)
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
}
