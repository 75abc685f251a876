//! Init command - print the shell wrapper function
//!
//! The wrapper runs `try exec`, and evaluates whatever script it prints
//! when it exits successfully. Invocations that only print information
//! bypass the evaluation.

use crate::{Result, TryError, script::shell_quote};
use std::env;
use std::path::Path;

/// First arguments the wrapper passes straight through
const PASSTHROUGH: &str = "init|config|help|version|-h|--help|-V|--version";
const FISH_PASSTHROUGH: &str = "init config help version -h --help -V --version";

/// Shells with a wrapper template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl Shell {
    /// Parse a shell name (case-insensitive); `sh` is treated as bash
    ///
    /// # Errors
    ///
    /// Returns `TryError::UnsupportedShell` for anything else.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "bash" | "sh" => Ok(Self::Bash),
            "zsh" => Ok(Self::Zsh),
            "fish" => Ok(Self::Fish),
            _ => Err(TryError::UnsupportedShell(name.to_string())),
        }
    }

    /// rc file the wrapper belongs in
    #[must_use]
    pub const fn rc_file(self) -> &'static str {
        match self {
            Self::Bash => "~/.bashrc",
            Self::Zsh => "~/.zshrc",
            Self::Fish => "~/.config/fish/config.fish",
        }
    }
}

/// Shell name from a `$SHELL` value, defaulting to bash
#[must_use]
pub fn detect(shell_var: Option<&str>) -> String {
    shell_var
        .filter(|s| !s.is_empty())
        .and_then(|s| Path::new(s).file_name())
        .map_or_else(|| "bash".to_string(), |name| name.to_string_lossy().into_owned())
}

/// Wrapper function for `shell` calling the binary at `executable`
#[must_use]
pub fn wrapper(shell: Shell, executable: &str) -> String {
    let exe = shell_quote(executable);
    let header = format!(
        "# try - experiment directory manager\n# Add this to your {}\n\n",
        shell.rc_file()
    );

    let body = match shell {
        Shell::Bash | Shell::Zsh => format!(
            r#"try() {{
  case "$1" in
    {PASSTHROUGH})
      {exe} "$@"
      return $?
      ;;
  esac
  local output
  output=$({exe} exec "$@")
  local exit_code=$?
  if [ $exit_code -eq 0 ] && [ -n "$output" ]; then
    eval "$output"
  fi
  return $exit_code
}}
"#
        ),
        Shell::Fish => format!(
            r#"function try
  switch "$argv[1]"
    case {FISH_PASSTHROUGH}
      {exe} $argv
      return $status
  end
  set -l output ({exe} exec $argv | string collect)
  set -l exit_code $status
  if test $exit_code -eq 0 -a -n "$output"
    eval $output
  end
  return $exit_code
end
"#
        ),
    };

    header + &body
}

/// Print the wrapper for `shell`, or the shell named by `$SHELL`
///
/// # Errors
///
/// Returns `TryError::UnsupportedShell` if the shell has no template.
pub fn execute(shell: Option<&str>) -> Result<String> {
    let name = shell.map_or_else(|| detect(env::var("SHELL").ok().as_deref()), str::to_string);
    let shell = Shell::from_name(&name)?;

    let executable = env::current_exe()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "try".to_string());

    tracing::debug!(?shell, %executable, "generating wrapper");
    Ok(wrapper(shell, &executable))
}
