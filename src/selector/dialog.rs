//! Confirmation dialogs
//!
//! Each dialog collects one line of text about a single entry and validates
//! it on Enter. Validation only reads the filesystem (existence checks); a
//! failure is reported as a message on the dialog and never ends the run.

use super::editor::LineEditor;
use super::outcome::Outcome;
use super::state::SelectorContext;
use crate::config::expand_home;
use crate::entry::Entry;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Word the delete dialog expects, compared case-insensitively
pub const DELETE_CONFIRMATION: &str = "YES";

pub const ERR_EMPTY_DESTINATION: &str = "destination cannot be empty";
pub const ERR_DESTINATION_EXISTS: &str = "destination already exists";
pub const ERR_MISSING_PARENT: &str = "parent directory does not exist";
pub const ERR_PARENT_NOT_DIR: &str = "parent is not a directory";
pub const ERR_NO_HOME: &str = "cannot expand ~: home directory unknown";
pub const ERR_CONFIRM_DELETE: &str = "type YES to confirm";
pub const ERR_EMPTY_NAME: &str = "name cannot be empty";
pub const ERR_NAME_SLASH: &str = "name cannot contain '/'";
pub const ERR_NAME_DASH: &str = "name cannot start with '-'";
pub const ERR_NAME_UNCHANGED: &str = "name is unchanged";
pub const ERR_NAME_TAKEN: &str = "a directory with that name already exists";

/// Which dialog is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// Move to a permanent project location
    Graduate,
    /// Delete after typing the confirmation word
    Delete,
    /// Rename within the tries root
    Rename,
}

impl DialogKind {
    /// Whether cursor movement, kill-to-end and word deletion are available
    #[must_use]
    pub const fn full_editing(self) -> bool {
        !matches!(self, Self::Delete)
    }
}

/// State of an open dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    /// Index of the entry under operation in the selector's snapshot
    pub entry: usize,
    /// Text being typed
    pub editor: LineEditor,
    /// Result of the last failed validation
    pub error: Option<String>,
}

impl Dialog {
    /// Open a dialog on `entry` with an initial buffer
    #[must_use]
    pub const fn new(entry: usize, editor: LineEditor) -> Self {
        Self {
            entry,
            editor,
            error: None,
        }
    }
}

/// Build the initial dialog for `kind` on `entry`
#[must_use]
pub fn open(kind: DialogKind, index: usize, entry: &Entry, ctx: &SelectorContext) -> Dialog {
    let editor = match kind {
        DialogKind::Graduate => LineEditor::with_text(
            ctx.projects_path.join(&entry.base_name).to_string_lossy().into_owned(),
        ),
        DialogKind::Delete => LineEditor::new(),
        DialogKind::Rename => LineEditor::with_text(entry.name.clone()),
    };
    Dialog::new(index, editor)
}

/// Validate the dialog buffer and build the outcome
///
/// # Errors
///
/// Returns the message to show on the dialog when validation fails.
pub fn validate(
    kind: DialogKind,
    buffer: &str,
    entry: &Entry,
    ctx: &SelectorContext,
) -> Result<Outcome, String> {
    match kind {
        DialogKind::Graduate => validate_graduate(buffer, entry, ctx),
        DialogKind::Delete => validate_delete(buffer, entry),
        DialogKind::Rename => validate_rename(buffer, entry, ctx),
    }
}

fn validate_graduate(buffer: &str, entry: &Entry, ctx: &SelectorContext) -> Result<Outcome, String> {
    let dest = buffer.trim();
    if dest.is_empty() {
        return Err(ERR_EMPTY_DESTINATION.to_string());
    }

    if dest.starts_with('~') && ctx.home.is_none() {
        return Err(ERR_NO_HOME.to_string());
    }
    let destination = expand_home(dest, ctx.home.as_deref());

    if exists(&destination).map_err(|e| format!("cannot check destination: {e}"))? {
        return Err(ERR_DESTINATION_EXISTS.to_string());
    }

    let parent = parent_of(&destination);
    match fs::metadata(&parent) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(ERR_PARENT_NOT_DIR.to_string()),
        Err(e) if is_missing(&e) => return Err(ERR_MISSING_PARENT.to_string()),
        Err(e) => return Err(format!("cannot check parent directory: {e}")),
    }

    Ok(Outcome::Graduate {
        source: entry.path.clone(),
        destination,
        name: entry.name.clone(),
    })
}

fn validate_delete(buffer: &str, entry: &Entry) -> Result<Outcome, String> {
    if !buffer.trim().eq_ignore_ascii_case(DELETE_CONFIRMATION) {
        return Err(ERR_CONFIRM_DELETE.to_string());
    }

    Ok(Outcome::Delete {
        path: entry.path.clone(),
        name: entry.name.clone(),
    })
}

fn validate_rename(buffer: &str, entry: &Entry, ctx: &SelectorContext) -> Result<Outcome, String> {
    let new_name = buffer.trim();
    if new_name.is_empty() {
        return Err(ERR_EMPTY_NAME.to_string());
    }
    if new_name.contains('/') {
        return Err(ERR_NAME_SLASH.to_string());
    }
    if new_name.starts_with('-') {
        return Err(ERR_NAME_DASH.to_string());
    }
    if new_name == entry.name {
        return Err(ERR_NAME_UNCHANGED.to_string());
    }

    let target = ctx.tries_path.join(new_name);
    if exists(&target).map_err(|e| format!("cannot check {new_name}: {e}"))? {
        return Err(ERR_NAME_TAKEN.to_string());
    }

    Ok(Outcome::Rename {
        old_name: entry.name.clone(),
        new_name: new_name.to_string(),
    })
}

/// Parent of `path`, with a bare relative name resolving to `.`
fn parent_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None => path.to_path_buf(),
    }
}

/// Whether anything (including a dangling symlink) sits at `path`
///
/// Errors other than "not found" are returned so callers can fail closed.
fn exists(path: &Path) -> io::Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if is_missing(&e) => Ok(false),
        Err(e) => Err(e),
    }
}

fn is_missing(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, entry};
    use tempfile::TempDir;

    #[test]
    fn test_open_graduate_seeds_projects_path() {
        let ctx = context("/tries", "/projects");
        let e = entry("2024-01-15-redis", 1);
        let dialog = open(DialogKind::Graduate, 3, &e, &ctx);

        assert_eq!(dialog.entry, 3);
        assert_eq!(dialog.editor.text(), "/projects/redis");
        assert_eq!(dialog.editor.cursor(), "/projects/redis".len());
        assert!(dialog.error.is_none());
    }

    #[test]
    fn test_open_delete_and_rename() {
        let ctx = context("/tries", "/projects");
        let e = entry("2024-01-15-redis", 1);

        let dialog = open(DialogKind::Delete, 0, &e, &ctx);
        assert_eq!(dialog.editor.text(), "");
        assert_eq!(dialog.editor.cursor(), 0);

        let dialog = open(DialogKind::Rename, 0, &e, &ctx);
        assert_eq!(dialog.editor.text(), "2024-01-15-redis");
    }

    #[test]
    fn test_graduate_validation_order() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(tmp.path().join("tries"), tmp.path());
        let e = entry("2024-01-15-redis", 1);

        assert_eq!(
            validate_graduate("   ", &e, &ctx),
            Err(ERR_EMPTY_DESTINATION.to_string())
        );

        fs::create_dir(tmp.path().join("taken")).unwrap();
        let taken = tmp.path().join("taken");
        assert_eq!(
            validate_graduate(taken.to_str().unwrap(), &e, &ctx),
            Err(ERR_DESTINATION_EXISTS.to_string())
        );

        let orphan = tmp.path().join("missing").join("redis");
        assert_eq!(
            validate_graduate(orphan.to_str().unwrap(), &e, &ctx),
            Err(ERR_MISSING_PARENT.to_string())
        );

        let good = tmp.path().join("redis");
        let outcome = validate_graduate(&format!("  {}  ", good.display()), &e, &ctx).unwrap();
        assert_eq!(
            outcome,
            Outcome::Graduate {
                source: e.path.clone(),
                destination: good,
                name: "2024-01-15-redis".to_string(),
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_graduate_stat_failure_fails_closed() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(tmp.path().join("tries"), tmp.path());
        let looped = tmp.path().join("loop");
        std::os::unix::fs::symlink(&looped, &looped).unwrap();

        let dest = looped.join("x");
        let err = validate_graduate(dest.to_str().unwrap(), &entry("redis", 1), &ctx).unwrap_err();
        assert_ne!(err, ERR_MISSING_PARENT);
        assert!(err.starts_with("cannot check"), "{err}");
    }

    #[test]
    fn test_graduate_parent_is_file() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(tmp.path().join("tries"), tmp.path());
        fs::write(tmp.path().join("file"), "x").unwrap();

        let dest = tmp.path().join("file").join("redis");
        let result = validate_graduate(dest.to_str().unwrap(), &entry("redis", 1), &ctx);
        assert!(result.is_err());
    }

    #[test]
    fn test_graduate_expands_home() {
        let tmp = TempDir::new().unwrap();
        let mut ctx = context(tmp.path().join("tries"), tmp.path());
        ctx.home = Some(tmp.path().to_path_buf());

        let outcome = validate_graduate("~/redis", &entry("redis", 1), &ctx).unwrap();
        let Outcome::Graduate { destination, .. } = outcome else {
            panic!("expected graduate outcome");
        };
        assert_eq!(destination, tmp.path().join("redis"));

        ctx.home = None;
        assert_eq!(
            validate_graduate("~/redis", &entry("redis", 1), &ctx),
            Err(ERR_NO_HOME.to_string())
        );
    }

    #[test]
    fn test_delete_confirmation_is_case_insensitive() {
        let e = entry("2024-01-15-redis", 1);
        for word in ["yes", "Yes", "YES", "  yes  "] {
            assert!(validate_delete(word, &e).is_ok(), "{word:?} should confirm");
        }
        for word in ["y", "", "yess", "no"] {
            assert_eq!(validate_delete(word, &e), Err(ERR_CONFIRM_DELETE.to_string()));
        }
    }

    #[test]
    fn test_rename_validation() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(tmp.path(), "/projects");
        fs::create_dir(tmp.path().join("2024-01-15-other")).unwrap();
        let e = entry("2024-01-15-redis", 1);

        assert_eq!(validate_rename(" ", &e, &ctx), Err(ERR_EMPTY_NAME.to_string()));
        assert_eq!(validate_rename("a/b", &e, &ctx), Err(ERR_NAME_SLASH.to_string()));
        assert_eq!(validate_rename("-f", &e, &ctx), Err(ERR_NAME_DASH.to_string()));
        assert_eq!(
            validate_rename("2024-01-15-redis", &e, &ctx),
            Err(ERR_NAME_UNCHANGED.to_string())
        );
        assert_eq!(
            validate_rename("2024-01-15-other", &e, &ctx),
            Err(ERR_NAME_TAKEN.to_string())
        );
        assert_eq!(
            validate_rename("2024-01-15-valkey", &e, &ctx),
            Ok(Outcome::Rename {
                old_name: "2024-01-15-redis".to_string(),
                new_name: "2024-01-15-valkey".to_string(),
            })
        );
    }

    #[test]
    fn test_parent_of_relative_name() {
        assert_eq!(parent_of(Path::new("redis")), PathBuf::from("."));
        assert_eq!(parent_of(Path::new("/a/b")), PathBuf::from("/a"));
    }
}
