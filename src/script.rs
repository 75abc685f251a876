//! Shell script emitter
//!
//! Turns a selector [`Outcome`] (or a CLI request) into a POSIX shell
//! snippet. The binary prints the snippet on stdout and the wrapper
//! function evaluates it, which is how `try` changes the caller's working
//! directory. Every path is single-quoted.

use crate::selector::Outcome;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Paths the emitter needs beyond the outcome itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitContext {
    /// Tries root
    pub tries_path: PathBuf,
    /// Directory the shell was in when `try` started (`$PWD`)
    pub cwd: Option<PathBuf>,
}

/// Quote `s` for a POSIX shell
///
/// ```
/// use tries::script::shell_quote;
///
/// assert_eq!(shell_quote("plain"), "'plain'");
/// assert_eq!(shell_quote("it's"), r"'it'\''s'");
/// ```
#[must_use]
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

fn quote_path(path: &Path) -> String {
    shell_quote(&path.to_string_lossy())
}

/// A chain of commands joined with `&&`
#[derive(Debug, Default)]
pub struct Script {
    steps: Vec<String>,
}

impl Script {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw command
    #[must_use]
    pub fn step(mut self, command: impl Into<String>) -> Self {
        self.steps.push(command.into());
        self
    }

    /// `cd '<path>'`
    #[must_use]
    pub fn cd(self, path: &Path) -> Self {
        let command = format!("cd {}", quote_path(path));
        self.step(command)
    }

    /// `mkdir -p '<path>'`
    #[must_use]
    pub fn mkdir(self, path: &Path) -> Self {
        let command = format!("mkdir -p {}", quote_path(path));
        self.step(command)
    }

    /// `echo '<message>'`
    #[must_use]
    pub fn echo(self, message: &str) -> Self {
        let command = format!("echo {}", shell_quote(message));
        self.step(command)
    }

    /// Render as one line, newline-terminated
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = self.steps.join(" && ");
        out.push('\n');
        out
    }
}

/// Shell script for `outcome`, or `None` when there is nothing to do
#[must_use]
pub fn render(outcome: &Outcome, ctx: &EmitContext) -> Option<String> {
    let script = match outcome {
        Outcome::Cancel => return None,
        Outcome::Cd(path) => Script::new().cd(path),
        Outcome::Mkdir(path) => Script::new().mkdir(path).cd(path),
        Outcome::Graduate {
            source,
            destination,
            name,
        } => graduate(source, destination, name, ctx),
        Outcome::Delete { path, name } => delete(path, name, ctx),
        Outcome::Rename { old_name, new_name } => Script::new()
            .cd(&ctx.tries_path)
            .step(format!("mv -- {} {}", shell_quote(old_name), shell_quote(new_name)))
            .echo(&format!("Renamed: {old_name} → {new_name}"))
            .cd(&ctx.tries_path.join(new_name)),
    };

    tracing::info!(action = outcome.action(), "emitting script");
    Some(script.render())
}

fn graduate(source: &Path, destination: &Path, name: &str, ctx: &EmitContext) -> Script {
    let source_q = quote_path(source);
    let dest_q = quote_path(destination);

    // Linked worktrees have a .git file; git must move those itself
    let mover = if source.join(".git").is_file() {
        format!("git worktree move {source_q} {dest_q}")
    } else {
        format!("mv {source_q} {dest_q}")
    };

    Script::new()
        .step(mover)
        .step(format!("ln -s {dest_q} {}", quote_path(&ctx.tries_path.join(name))))
        .echo(&format!("Graduated: {name} → {}", destination.display()))
        .cd(destination)
}

fn delete(path: &Path, name: &str, ctx: &EmitContext) -> Script {
    let mut recover = String::from("( ");
    if let Some(cwd) = &ctx.cwd {
        let _ = write!(recover, "cd {} 2>/dev/null || ", quote_path(cwd));
    }
    let _ = write!(recover, "cd {} )", quote_path(&ctx.tries_path));

    Script::new()
        .step(format!("rm -rf {}", quote_path(path)))
        .echo(&format!("Deleted: {name}"))
        .step(recover)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn ctx() -> EmitContext {
        EmitContext {
            tries_path: PathBuf::from("/home/u/tries"),
            cwd: Some(PathBuf::from("/home/u/tries/2024-01-15-redis")),
        }
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("a b"), "'a b'");
        assert_eq!(shell_quote("$HOME"), "'$HOME'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn test_cancel_emits_nothing() {
        assert_eq!(render(&Outcome::Cancel, &ctx()), None);
    }

    #[test]
    fn test_cd_and_mkdir() {
        let path = PathBuf::from("/home/u/tries/2024-01-15-redis");
        assert_eq!(
            render(&Outcome::Cd(path.clone()), &ctx()).unwrap(),
            "cd '/home/u/tries/2024-01-15-redis'\n"
        );
        assert_eq!(
            render(&Outcome::Mkdir(path), &ctx()).unwrap(),
            "mkdir -p '/home/u/tries/2024-01-15-redis' && cd '/home/u/tries/2024-01-15-redis'\n"
        );
    }

    #[test]
    fn test_quotes_hostile_names() {
        let path = PathBuf::from("/t/2024-01-15-it's; rm -rf ~");
        let script = render(&Outcome::Cd(path), &ctx()).unwrap();
        assert_eq!(script, "cd '/t/2024-01-15-it'\\''s; rm -rf ~'\n");
    }

    #[test]
    fn test_graduate_plain_directory() {
        let outcome = Outcome::Graduate {
            source: PathBuf::from("/home/u/tries/2024-01-15-redis"),
            destination: PathBuf::from("/home/u/redis"),
            name: "2024-01-15-redis".to_string(),
        };
        assert_eq!(
            render(&outcome, &ctx()).unwrap(),
            "mv '/home/u/tries/2024-01-15-redis' '/home/u/redis' && \
             ln -s '/home/u/redis' '/home/u/tries/2024-01-15-redis' && \
             echo 'Graduated: 2024-01-15-redis → /home/u/redis' && \
             cd '/home/u/redis'\n"
        );
    }

    #[test]
    fn test_graduate_worktree_uses_git() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("2024-01-15-feature");
        fs::create_dir(&source).unwrap();
        fs::write(source.join(".git"), "gitdir: /src/repo/.git/worktrees/feature\n").unwrap();

        let outcome = Outcome::Graduate {
            source: source.clone(),
            destination: PathBuf::from("/home/u/feature"),
            name: "2024-01-15-feature".to_string(),
        };
        let script = render(&outcome, &ctx()).unwrap();
        let expected = format!("git worktree move '{}' '/home/u/feature' && ", source.display());
        assert!(script.starts_with(&expected), "{script}");
    }

    #[test]
    fn test_delete_recovers_working_directory() {
        let outcome = Outcome::Delete {
            path: PathBuf::from("/home/u/tries/2024-01-15-redis"),
            name: "2024-01-15-redis".to_string(),
        };
        assert_eq!(
            render(&outcome, &ctx()).unwrap(),
            "rm -rf '/home/u/tries/2024-01-15-redis' && \
             echo 'Deleted: 2024-01-15-redis' && \
             ( cd '/home/u/tries/2024-01-15-redis' 2>/dev/null || cd '/home/u/tries' )\n"
        );

        let no_cwd = EmitContext {
            cwd: None,
            ..ctx()
        };
        assert!(render(&outcome, &no_cwd).unwrap().ends_with("&& ( cd '/home/u/tries' )\n"));
    }

    #[test]
    fn test_rename() {
        let outcome = Outcome::Rename {
            old_name: "2024-01-15-redis".to_string(),
            new_name: "2024-01-15-valkey".to_string(),
        };
        assert_eq!(
            render(&outcome, &ctx()).unwrap(),
            "cd '/home/u/tries' && \
             mv -- '2024-01-15-redis' '2024-01-15-valkey' && \
             echo 'Renamed: 2024-01-15-redis → 2024-01-15-valkey' && \
             cd '/home/u/tries/2024-01-15-valkey'\n"
        );
    }
}
