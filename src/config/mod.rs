//! Configuration module for try
//!
//! Resolves where experiments live and where graduated projects go.
//! Settings are layered, lowest precedence first:
//!
//! 1. Built-in defaults (`~/tries`, projects next to it)
//! 2. `<config_dir>/try/config.toml`
//! 3. `TRY_*` environment variables (`TRY_PATH`, `TRY_PROJECTS`, `TRY_LOG`)

use config::{Config, ConfigError, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default tracing filter
const DEFAULT_LOG_FILTER: &str = "info";

/// Raw settings as read from the config sources
#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    /// Tries root
    #[serde(default)]
    path: Option<String>,
    /// Graduation destination root
    #[serde(default)]
    projects: Option<String>,
    /// Tracing filter directive
    #[serde(default)]
    log: Option<String>,
}

/// Resolved application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TryConfig {
    /// Directory holding experiment directories
    pub tries_path: PathBuf,
    /// Default parent for graduated projects
    pub projects_path: PathBuf,
    /// Filter directive for the log file
    pub log_filter: String,
}

impl TryConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("try").join("config.toml"))
    }

    /// Load configuration from the config file and the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or the home
    /// directory is needed but unknown.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path().ok();
        Self::from_sources(config_path.as_deref(), None, dirs::home_dir().as_deref())
    }

    /// Build configuration from explicit sources
    ///
    /// `env` replaces the process environment when given, which keeps tests
    /// independent of the caller's shell.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or the home
    /// directory is needed but unknown.
    pub fn from_sources(
        config_file: Option<&Path>,
        env: Option<Map<String, String>>,
        home: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
        builder = builder.add_source(Environment::with_prefix("TRY").source(env));

        let raw: RawConfig = builder.build()?.try_deserialize()?;
        Self::resolve(raw, home)
    }

    fn resolve(raw: RawConfig, home: Option<&Path>) -> Result<Self, ConfigError> {
        let tries_path = match raw.path.filter(|p| !p.is_empty()) {
            Some(path) => expand_home(&path, home),
            None => home
                .map(|h| h.join("tries"))
                .ok_or_else(|| ConfigError::Message("Could not determine home directory".to_string()))?,
        };

        let projects_path = match raw.projects.filter(|p| !p.is_empty()) {
            Some(path) => expand_home(&path, home),
            None => tries_path
                .parent()
                .map_or_else(|| tries_path.clone(), Path::to_path_buf),
        };

        Ok(Self {
            tries_path,
            projects_path,
            log_filter: raw.log.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    /// Render the resolved configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }
}

/// Expand a leading `~` to `home`
///
/// Paths without `~`, or with no known home, are returned unchanged.
#[must_use]
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(rest), Some(home)) => home.join(rest.trim_start_matches('/')),
        _ => PathBuf::from(path),
    }
}
