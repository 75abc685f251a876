//! Tries - a manager for short-lived experiment directories
//!
//! This library provides the pieces behind the `try` command: loading dated
//! experiment directories, ranking them with a fuzzy matcher, driving the
//! interactive selector, and turning the selector's outcome into a shell
//! script for the wrapper function to evaluate.

use std::path::PathBuf;
use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod entry;
pub mod fuzzy;
pub mod logging;
pub mod output;
pub mod script;
pub mod selector;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TryError {
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Shell without a wrapper template
    #[error("unsupported shell: {0} (supported: bash, zsh, fish)")]
    UnsupportedShell(String),
    /// A clone URL that does not name a user and repository
    #[error("could not parse git URL: {0}")]
    InvalidGitUrl(String),
    /// A path argument that should have been a directory
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, TryError>;
