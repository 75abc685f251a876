//! Fuzzy subsequence matcher
//!
//! Scores candidate strings against a query. Every query character has to
//! appear in the candidate in order (case-insensitively); gaps are allowed.
//! Matches at word boundaries and runs of consecutive characters score
//! higher, and the total is scaled down for long candidates so short, precise
//! names rank first.

use std::cmp::Ordering;

/// Weight of every matched character
const MATCH_WEIGHT: f64 = 1.0;
/// Bonus for a match at the start of a word
const BOUNDARY_BONUS: f64 = 1.0;
/// Bonus for a match directly after the previous match
const CONSECUTIVE_BONUS: f64 = 2.0;
/// Added to the candidate length in the length penalty
const LENGTH_DAMPING: f64 = 10.0;

/// A candidate that matched the query
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// The candidate text as given
    pub text: String,
    /// Relevance score, higher is better
    pub score: f64,
    /// Character (not byte) positions of the matched characters
    pub positions: Vec<usize>,
    /// Index of the candidate in the input list
    pub index: usize,
}

/// Match `candidates` against `query`, best match first.
///
/// An empty query passes every candidate through in input order with a score
/// of 0. Otherwise candidates that do not contain the query as a subsequence
/// are dropped, and ties keep their input order.
#[must_use]
pub fn search<S: AsRef<str>>(query: &str, candidates: &[S]) -> Vec<Match> {
    if query.is_empty() {
        return candidates
            .iter()
            .enumerate()
            .map(|(index, text)| Match {
                text: text.as_ref().to_string(),
                score: 0.0,
                positions: Vec::new(),
                index,
            })
            .collect();
    }

    let query: Vec<char> = query.chars().map(fold_case).collect();

    let mut matches: Vec<Match> = candidates
        .iter()
        .enumerate()
        .filter_map(|(index, text)| {
            let text = text.as_ref();
            score(&query, text).map(|(score, positions)| Match {
                text: text.to_string(),
                score,
                positions,
                index,
            })
        })
        .collect();

    // sort_by is stable, so equal scores keep input order
    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    matches
}

/// Lowercase a single character without changing the character count
fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Score one candidate, `None` when the query is not a subsequence of it
fn score(query: &[char], text: &str) -> Option<(f64, Vec<usize>)> {
    if query.is_empty() || text.is_empty() {
        return None;
    }

    let raw: Vec<char> = text.chars().collect();
    let mut positions = Vec::with_capacity(query.len());
    let mut query_idx = 0;
    let mut last_match: Option<usize> = None;
    let mut total = 0.0;

    for (i, &c) in raw.iter().enumerate() {
        if query_idx >= query.len() {
            break;
        }
        if fold_case(c) != query[query_idx] {
            continue;
        }

        positions.push(i);
        let mut char_score = MATCH_WEIGHT;

        // The uppercase check reads the raw candidate character
        if i == 0 || !raw[i - 1].is_alphabetic() || c.is_uppercase() {
            char_score += BOUNDARY_BONUS;
        }
        if last_match.is_some_and(|last| i == last + 1) {
            char_score += CONSECUTIVE_BONUS;
        }

        total += char_score;
        last_match = Some(i);
        query_idx += 1;
    }

    if query_idx < query.len() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let penalty = query.len() as f64 / (raw.len() as f64 + LENGTH_DAMPING);
    Some((total * penalty, positions))
}
