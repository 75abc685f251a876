//! Experiment directory entries
//!
//! An entry is one directory directly under the tries root. Names usually
//! carry a `YYYY-MM-DD-` prefix recording the day the experiment started;
//! the remainder is the entry's base name.

mod worktree;

pub use worktree::source_repo_of;

use chrono::{DateTime, Local};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Length of the `YYYY-MM-DD-` prefix
pub const DATE_PREFIX_LEN: usize = 11;

#[allow(clippy::expect_used)]
static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}-").expect("date prefix pattern is valid"));

/// A directory in the tries folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Directory name (e.g. `2024-01-15-redis`)
    pub name: String,
    /// Full path
    pub path: PathBuf,
    /// Last modification time
    pub modified: DateTime<Local>,
    /// Whether the name starts with a date prefix
    pub has_date: bool,
    /// Name without the date prefix (e.g. `redis`)
    pub base_name: String,
    /// Whether the directory is a linked git worktree
    pub is_worktree: bool,
    /// Repository the worktree belongs to
    pub source_repo: Option<String>,
}

impl Entry {
    /// Build an entry from a name, path and modification time
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, modified: DateTime<Local>) -> Self {
        let name = name.into();
        let has_date = has_date_prefix(&name);
        let base_name = if has_date {
            name[DATE_PREFIX_LEN..].to_string()
        } else {
            name.clone()
        };

        Self {
            name,
            path: path.into(),
            modified,
            has_date,
            base_name,
            is_worktree: false,
            source_repo: None,
        }
    }

    /// Mark the entry as a worktree of `repo`
    #[must_use]
    pub fn with_worktree(mut self, repo: Option<String>) -> Self {
        self.is_worktree = true;
        self.source_repo = repo;
        self
    }

    /// Read an entry from disk
    ///
    /// Returns `Ok(None)` when `path` is not a directory.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the path cannot be stat'ed.
    pub fn from_path(path: &Path) -> io::Result<Option<Self>> {
        let metadata = fs::metadata(path)?;
        if !metadata.is_dir() {
            return Ok(None);
        }

        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            return Ok(None);
        };
        let modified: DateTime<Local> = metadata.modified()?.into();
        let mut entry = Self::new(name, path, modified);

        let git_file = path.join(".git");
        if git_file.is_file() {
            entry = entry.with_worktree(source_repo_of(&git_file));
        }

        Ok(Some(entry))
    }

    /// Recency score shown next to the entry when no query is typed
    ///
    /// 100 if touched within a day, 50 within a week, 20 within 30 days,
    /// plus 10 for a dated name.
    #[must_use]
    pub fn recency_score(&self, now: DateTime<Local>) -> f64 {
        let hours = (now - self.modified).num_hours();
        let mut score = match hours {
            h if h < 24 => 100.0,
            h if h < 24 * 7 => 50.0,
            h if h < 24 * 30 => 20.0,
            _ => 0.0,
        };
        if self.has_date {
            score += 10.0;
        }
        score
    }
}

/// Whether `name` begins with `YYYY-MM-DD-`
#[must_use]
pub fn has_date_prefix(name: &str) -> bool {
    DATE_PREFIX.is_match(name)
}

/// Load every experiment directory under `tries_root`, newest first
///
/// Hidden directories and plain files are skipped, as are entries that
/// cannot be stat'ed. A missing root yields an empty list.
///
/// # Errors
///
/// Returns an I/O error if the root exists but cannot be read.
pub fn load_entries(tries_root: &Path) -> io::Result<Vec<Entry>> {
    let dir = match fs::read_dir(tries_root) {
        Ok(dir) => dir,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut entries = Vec::new();
    for dirent in dir {
        let Ok(dirent) = dirent else { continue };
        if dirent.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        match Entry::from_path(&dirent.path()) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => {}
            Err(e) => tracing::debug!(path = %dirent.path().display(), error = %e, "skipping entry"),
        }
    }

    entries.sort_by(|a, b| b.modified.cmp(&a.modified));
    tracing::info!(root = %tries_root.display(), count = entries.len(), "loaded entries");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_date_prefix_detection() {
        let entry = Entry::new("2024-01-15-redis", "/tries/2024-01-15-redis", now());
        assert!(entry.has_date);
        assert_eq!(entry.base_name, "redis");

        let entry = Entry::new("scratch", "/tries/scratch", now());
        assert!(!entry.has_date);
        assert_eq!(entry.base_name, "scratch");

        assert!(!has_date_prefix("2024-1-15-redis"));
        assert!(!has_date_prefix("2024-01-15redis"));
        assert!(has_date_prefix("2024-01-15-"));
    }

    #[test]
    fn test_recency_score() {
        let at = |hours: i64, name: &str| {
            Entry::new(name, "/tries/x", now() - Duration::hours(hours)).recency_score(now())
        };

        assert_eq!(at(1, "plain"), 100.0);
        assert_eq!(at(1, "2024-01-15-dated"), 110.0);
        assert_eq!(at(48, "plain"), 50.0);
        assert_eq!(at(24 * 10, "plain"), 20.0);
        assert_eq!(at(24 * 40, "plain"), 0.0);
        assert_eq!(at(24 * 40, "2023-12-01-old"), 10.0);
    }

    #[test]
    fn test_load_entries_missing_root() {
        let tmp = TempDir::new().unwrap();
        let entries = load_entries(&tmp.path().join("nope")).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_load_entries_skips_files_and_hidden() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("2024-01-15-redis")).unwrap();
        fs::create_dir(tmp.path().join(".hidden")).unwrap();
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();

        let entries = load_entries(tmp.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "2024-01-15-redis");
        assert!(entries[0].has_date);
        assert!(!entries[0].is_worktree);
    }

    #[test]
    fn test_non_ascii_digits_are_not_a_date() {
        let entry = Entry::new("००००-००-००-x", "/t/००००-००-००-x", now());
        assert!(!entry.has_date);
        assert_eq!(entry.base_name, "००००-००-००-x");

        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("२०२४-०१-१५-redis")).unwrap();
        let entries = load_entries(tmp.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].has_date);
    }

    #[test]
    fn test_load_entries_detects_worktree() {
        let tmp = TempDir::new().unwrap();
        let wt = tmp.path().join("2024-01-15-feature");
        fs::create_dir(&wt).unwrap();
        fs::write(wt.join(".git"), "gitdir: /src/myrepo/.git/worktrees/2024-01-15-feature\n").unwrap();

        let entries = load_entries(tmp.path()).unwrap();
        assert!(entries[0].is_worktree);
        assert_eq!(entries[0].source_repo.as_deref(), Some("myrepo"));
    }
}
