//! Terminal outcome of a selector run

use std::path::PathBuf;

/// What the user decided, produced exactly once per selector run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No further action
    Cancel,
    /// Change into an existing experiment
    Cd(PathBuf),
    /// Create a new experiment directory and change into it
    Mkdir(PathBuf),
    /// Move an experiment to a permanent location, leaving a symlink behind
    Graduate {
        /// Current location of the experiment
        source: PathBuf,
        /// Validated destination
        destination: PathBuf,
        /// Directory name under the tries root
        name: String,
    },
    /// Remove an experiment recursively
    Delete {
        /// Directory to remove
        path: PathBuf,
        /// Directory name, for the confirmation message
        name: String,
    },
    /// Rename an experiment within the tries root
    Rename {
        /// Current directory name
        old_name: String,
        /// New directory name
        new_name: String,
    },
}

impl Outcome {
    /// Short action name used in logs
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Cancel => "cancel",
            Self::Cd(_) => "cd",
            Self::Mkdir(_) => "mkdir",
            Self::Graduate { .. } => "graduate",
            Self::Delete { .. } => "delete",
            Self::Rename { .. } => "rename",
        }
    }
}
