//! Testing utilities for tries
//!
//! Fixtures for building entries and selector contexts against a fixed
//! clock, so dates and ages in tests never depend on when they run.
//!
//! Only available when compiled with `cfg(test)`.

use crate::entry::Entry;
use crate::selector::{Selector, SelectorContext};
use chrono::{DateTime, Duration, Local, TimeZone};
use std::path::PathBuf;

/// The fixed "now" used by every fixture: 2024-01-15 12:00 local time
///
/// # Panics
/// Panics if the local timezone cannot represent the instant.
#[must_use]
pub fn fixed_now() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 1, 15, 12, 0, 0)
        .single()
        .expect("fixed test time is unambiguous")
}

/// Build a selector context rooted at `tries` and `projects`
///
/// No home directory is set; tests that expand `~` set `home` themselves.
pub fn context(tries: impl Into<PathBuf>, projects: impl Into<PathBuf>) -> SelectorContext {
    SelectorContext {
        tries_path: tries.into(),
        projects_path: projects.into(),
        home: None,
        now: fixed_now(),
    }
}

/// Build an entry under `/tries` modified `hours_ago` hours before [`fixed_now`]
#[must_use]
pub fn entry(name: &str, hours_ago: i64) -> Entry {
    Entry::new(
        name,
        PathBuf::from("/tries").join(name),
        fixed_now() - Duration::hours(hours_ago),
    )
}

/// Build a selector over `names` (all modified an hour ago) with `query`
#[must_use]
pub fn selector(names: &[&str], query: &str) -> Selector {
    let entries = names.iter().map(|name| entry(name, 1)).collect();
    Selector::new(entries, query, context("/tries", "/projects"))
}
