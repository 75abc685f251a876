//! Clone command - clone a repository into a dated directory

use super::date_prefix;
use crate::{
    Result, TryError,
    config::TryConfig,
    script::{Script, shell_quote},
};
use chrono::{DateTime, Local};
use regex::Regex;
use std::sync::LazyLock;

/// URL shapes we know how to take `user/repo` from, most specific first
#[allow(clippy::expect_used)]
static GIT_URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^https?://github\.com/([^/]+)/([^/]+)",
        r"^git@github\.com:([^/]+)/([^/]+)",
        r"^https?://[^/]+/([^/]+)/([^/]+)",
        r"^git@[^:]+:([^/]+)/([^/]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("git URL pattern is valid"))
    .collect()
});

/// Extract `(user, repo)` from a git URL, dropping any `.git` suffix
///
/// # Errors
///
/// Returns `TryError::InvalidGitUrl` if the URL matches no known shape.
pub fn parse_git_uri(uri: &str) -> Result<(String, String)> {
    let trimmed = uri.strip_suffix(".git").unwrap_or(uri);

    GIT_URL_PATTERNS
        .iter()
        .find_map(|re| re.captures(trimmed))
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .ok_or_else(|| TryError::InvalidGitUrl(uri.to_string()))
}

/// Whether a bare argument looks like a repository URL rather than a query
#[must_use]
pub fn is_git_url(arg: &str) -> bool {
    let url_like = ["https://", "http://", "git@"]
        .iter()
        .any(|prefix| arg.starts_with(prefix))
        || arg.ends_with(".git");
    url_like && parse_git_uri(arg).is_ok()
}

/// Script cloning `url` into `<tries>/<date>-<user>-<repo>`
///
/// # Errors
///
/// Returns `TryError::InvalidInput` if `url` is empty, or
/// `TryError::InvalidGitUrl` if it cannot be parsed.
pub fn execute(config: &TryConfig, url: &str, now: DateTime<Local>) -> Result<String> {
    if url.is_empty() {
        return Err(TryError::InvalidInput(
            "clone requires a repository URL".to_string(),
        ));
    }
    let (user, repo) = parse_git_uri(url)?;
    let dir = config
        .tries_path
        .join(format!("{}-{user}-{repo}", date_prefix(now)));

    tracing::info!(%url, dir = %dir.display(), "cloning");
    Ok(Script::new()
        .mkdir(&dir)
        .echo(&format!("Using git clone to create this trial from {url}."))
        .step(format!(
            "git clone {} {}",
            shell_quote(url),
            shell_quote(&dir.to_string_lossy())
        ))
        .cd(&dir)
        .render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixed_now;
    use std::path::PathBuf;

    fn pair(user: &str, repo: &str) -> (String, String) {
        (user.to_string(), repo.to_string())
    }

    #[test]
    fn test_parse_github_urls() {
        assert_eq!(
            parse_git_uri("https://github.com/tobi/try").unwrap(),
            pair("tobi", "try")
        );
        assert_eq!(
            parse_git_uri("https://github.com/tobi/try.git").unwrap(),
            pair("tobi", "try")
        );
        assert_eq!(
            parse_git_uri("git@github.com:tobi/try.git").unwrap(),
            pair("tobi", "try")
        );
    }

    #[test]
    fn test_parse_other_hosts() {
        assert_eq!(
            parse_git_uri("https://gitlab.com/group/project").unwrap(),
            pair("group", "project")
        );
        assert_eq!(
            parse_git_uri("git@codeberg.org:me/thing.git").unwrap(),
            pair("me", "thing")
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            parse_git_uri("not a url"),
            Err(TryError::InvalidGitUrl(url)) if url == "not a url"
        ));
        assert!(parse_git_uri("https://github.com/onlyuser").is_err());
    }

    #[test]
    fn test_is_git_url() {
        assert!(is_git_url("https://github.com/tobi/try"));
        assert!(is_git_url("git@github.com:tobi/try.git"));
        assert!(is_git_url("https://gitlab.com/org/project"));

        for query in ["redis", "my-project", "./path", ".", "notes.git", "https://github.com/tobi"] {
            assert!(!is_git_url(query), "{query} is a query");
        }
    }

    #[test]
    fn test_clone_requires_url() {
        let config = TryConfig {
            tries_path: PathBuf::from("/home/u/tries"),
            projects_path: PathBuf::from("/home/u"),
            log_filter: "info".to_string(),
        };
        assert!(matches!(
            execute(&config, "", fixed_now()),
            Err(TryError::InvalidInput(msg)) if msg.contains("URL")
        ));
    }

    #[test]
    fn test_clone_script() {
        let config = TryConfig {
            tries_path: PathBuf::from("/home/u/tries"),
            projects_path: PathBuf::from("/home/u"),
            log_filter: "info".to_string(),
        };
        let script = execute(&config, "https://github.com/tobi/try.git", fixed_now()).unwrap();
        assert_eq!(
            script,
            "mkdir -p '/home/u/tries/2024-01-15-tobi-try' && \
             echo 'Using git clone to create this trial from https://github.com/tobi/try.git.' && \
             git clone 'https://github.com/tobi/try.git' '/home/u/tries/2024-01-15-tobi-try' && \
             cd '/home/u/tries/2024-01-15-tobi-try'\n"
        );
    }
}
