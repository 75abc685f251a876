//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for `try` using the `clap` crate.
//!
//! # Commands
//!
//! - **(none)** / **exec**: Interactive selector, seeded with an optional query
//! - **init**: Print the shell wrapper function
//! - **clone**: Clone a repository into a dated directory
//! - **config**: Print the resolved configuration
//!
//! A first argument starting with `.` (`try .`, `try ./path`) names a
//! repository to create a dated worktree from instead of a query. A leading
//! `clone <url>` or a bare repository URL clones, so both work through the
//! wrapper's `try exec "$@"`.
//!
//! # Examples
//!
//! ```no_run
//! use tries::cli::{Cli, Invocation};
//!
//! let cli = Cli::parse_args();
//! match cli.invocation() {
//!     Invocation::Select { query } => println!("selecting with {query:?}"),
//!     other => println!("{other:?}"),
//! }
//! ```

use crate::commands::clone::is_git_url;
use clap::{Parser, Subcommand};

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "try")]
#[command(about = "Manage short-lived experiment directories", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Search query, or `.`/`./path` followed by an optional name
    #[arg(value_name = "QUERY", num_args = 0..)]
    pub args: Vec<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive selector (what the shell wrapper calls)
    Exec {
        /// Search query, or `.`/`./path` followed by an optional name
        #[arg(value_name = "QUERY", num_args = 0..)]
        args: Vec<String>,
    },

    /// Print the shell wrapper function
    Init {
        /// Shell to generate for (bash, zsh, fish); detected from $SHELL if omitted
        #[arg(value_name = "SHELL")]
        shell: Option<String>,
    },

    /// Clone a git repository into a dated directory
    Clone {
        /// Repository URL (https or ssh)
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Print the resolved configuration
    Config,
}

/// What the user asked for, after folding positional forms together
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Interactive selector
    Select {
        /// Initial query
        query: String,
    },
    /// Dated worktree (or plain directory) from a local repository
    Worktree {
        /// Repository path as typed (`.` or `./path`)
        path: String,
        /// Extra words naming the new directory
        name: Vec<String>,
    },
    /// Shell wrapper
    Init {
        /// Requested shell
        shell: Option<String>,
    },
    /// Clone into a dated directory
    Clone {
        /// Repository URL
        url: String,
    },
    /// Print configuration
    Config,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Resolve the parsed arguments into a single invocation
    #[must_use]
    pub fn invocation(&self) -> Invocation {
        match &self.command {
            None => positional(&self.args),
            Some(Commands::Exec { args }) => positional(args),
            Some(Commands::Init { shell }) => Invocation::Init {
                shell: shell.clone(),
            },
            Some(Commands::Clone { url }) => Invocation::Clone { url: url.clone() },
            Some(Commands::Config) => Invocation::Config,
        }
    }
}

fn positional(args: &[String]) -> Invocation {
    match args.split_first() {
        Some((first, rest)) if first == "clone" => Invocation::Clone {
            url: rest.first().cloned().unwrap_or_default(),
        },
        Some((first, _)) if is_git_url(first) => Invocation::Clone { url: first.clone() },
        Some((first, rest)) if first.starts_with('.') => Invocation::Worktree {
            path: first.clone(),
            name: rest.to_vec(),
        },
        _ => Invocation::Select {
            query: args.join(" "),
        },
    }
}
