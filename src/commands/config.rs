//! Config command - show the resolved configuration

use crate::{Result, config::TryConfig};

/// Render `config` as TOML, preceded by a comment naming the config file
///
/// # Errors
///
/// Returns `TryError::ConfigError` if serialization fails.
pub fn execute(config: &TryConfig) -> Result<String> {
    let mut out = match TryConfig::config_path() {
        Ok(path) => format!("# config file: {}\n", path.display()),
        Err(_) => String::new(),
    };
    out.push_str(&config.to_toml()?);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_prints_resolved_values() {
        let config = TryConfig {
            tries_path: PathBuf::from("/home/u/tries"),
            projects_path: PathBuf::from("/home/u/code"),
            log_filter: "debug".to_string(),
        };
        let out = execute(&config).unwrap();

        assert!(out.contains("tries_path = \"/home/u/tries\""));
        assert!(out.contains("projects_path = \"/home/u/code\""));
        assert!(out.contains("log_filter = \"debug\""));
    }
}
