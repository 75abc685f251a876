//! Output abstraction layer
//!
//! Stdout carries the shell script the wrapper function evaluates, so every
//! human-readable message goes to stderr through an [`OutputWriter`].

use colored::Colorize;

/// Trait for user-facing messages
///
/// # Examples
///
/// ```no_run
/// use tries::output::{OutputWriter, StderrWriter};
///
/// let output = StderrWriter::new();
/// output.success("Created 2024-01-15-redis");
/// output.error("Something went wrong");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write a normal message
    fn write(&self, message: &str);

    /// Write an error message
    fn error(&self, message: &str);

    /// Write a success message
    fn success(&self, message: &str);

    /// Write a warning message
    fn warning(&self, message: &str);

    /// Write an info message (dimmed/secondary)
    fn info(&self, message: &str);
}

/// CLI implementation - colored messages on stderr
pub struct StderrWriter;

impl StderrWriter {
    /// Create a new stderr writer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for StderrWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for StderrWriter {
    fn write(&self, message: &str) {
        eprintln!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "error:".red().bold(), message);
    }

    fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    fn info(&self, message: &str) {
        eprintln!("{}", message.dimmed());
    }
}

/// Writer that records messages instead of printing them
#[cfg(test)]
#[derive(Default)]
pub struct RecordingWriter {
    messages: std::sync::Mutex<Vec<(&'static str, String)>>,
}

#[cfg(test)]
impl RecordingWriter {
    pub fn messages(&self) -> Vec<(&'static str, String)> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    fn push(&self, level: &'static str, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }
}

#[cfg(test)]
impl OutputWriter for RecordingWriter {
    fn write(&self, message: &str) {
        self.push("write", message);
    }

    fn error(&self, message: &str) {
        self.push("error", message);
    }

    fn success(&self, message: &str) {
        self.push("success", message);
    }

    fn warning(&self, message: &str) {
        self.push("warning", message);
    }

    fn info(&self, message: &str) {
        self.push("info", message);
    }
}
