//! # Fuzzy Name Matcher
//!
//! Scores a free-text query against every region name in the catalog and
//! returns a ranked shortlist. Deliberately a cheap positional heuristic,
//! not edit distance: the catalog is small and the ordering must be
//! reproducible in tests.
//!
//! ## Scoring
//!
//! After lower-casing both sides:
//!
//! - 1.0 — name equals the query
//! - 0.9 — name starts with the query
//! - 0.7 — name contains the query
//! - otherwise, the fraction of position-by-position character matches
//!   over the shorter length, divided by the longer length, scaled by 0.5
//!
//! Candidates scoring ≤ 0.3 are discarded. Ordering is score descending;
//! scores within 0.01 of each other count as tied and order by ascending
//! region level (country before finer subdivisions), then by name.

use ndl_core::{RegionCatalog, RegionCode};

/// Default shortlist length.
pub const DEFAULT_SHORTLIST: usize = 8;

/// Queries shorter than this return nothing — single characters fan out
/// to most of the catalog and produce noise, not suggestions.
pub const MIN_QUERY_LEN: usize = 2;

/// Candidates at or below this score are discarded.
const SCORE_FLOOR: f64 = 0.3;

/// Scores closer than this count as tied.
const TIE_EPSILON: f64 = 0.01;

/// A scored catalog entry for one query. Ephemeral: produced per query,
/// discarded after the suggestions are rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    /// The catalog entry's region code.
    pub code: RegionCode,
    /// The catalog entry's display name.
    pub name: String,
    /// Heuristic relevance in [0, 1].
    pub score: f64,
}

impl MatchCandidate {
    /// The suggestion text offered to the user. The bracketed code is what
    /// the resolver extracts back out when the suggestion is accepted.
    pub fn suggestion_label(&self) -> String {
        format!("{} [{}]", self.name, self.code)
    }
}

/// Fuzzy matcher over a borrowed region catalog.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher<'a> {
    catalog: &'a RegionCatalog,
}

impl<'a> FuzzyMatcher<'a> {
    /// Create a matcher over the session's catalog.
    pub fn new(catalog: &'a RegionCatalog) -> Self {
        Self { catalog }
    }

    /// Rank the catalog against `query`, most relevant first, at most `k`
    /// results. Queries shorter than [`MIN_QUERY_LEN`] yield nothing.
    pub fn top_matches(&self, query: &str, k: usize) -> Vec<MatchCandidate> {
        let query = query.trim().to_lowercase();
        if query.chars().count() < MIN_QUERY_LEN || k == 0 {
            return Vec::new();
        }

        let mut candidates: Vec<MatchCandidate> = self
            .catalog
            .iter()
            .filter_map(|(code, name)| {
                let score = score_name(&query, &name.to_lowercase());
                if score <= SCORE_FLOOR {
                    return None;
                }
                Some(MatchCandidate {
                    code: code.clone(),
                    name: name.to_string(),
                    score,
                })
            })
            .collect();

        // Quantizing to the tie epsilon makes the ordering total: scores in
        // the same hundredth-bucket are tied and fall through to level,
        // then name.
        candidates.sort_by(|a, b| {
            let ba = (a.score / TIE_EPSILON).round() as i64;
            let bb = (b.score / TIE_EPSILON).round() as i64;
            bb.cmp(&ba)
                .then_with(|| a.code.level().cmp(&b.code.level()))
                .then_with(|| a.name.cmp(&b.name))
        });
        candidates.truncate(k);
        candidates
    }

    /// The single best match, if any.
    pub fn best(&self, query: &str) -> Option<MatchCandidate> {
        self.top_matches(query, 1).into_iter().next()
    }
}

/// Score one lower-cased name against a lower-cased query.
fn score_name(query: &str, name: &str) -> f64 {
    if name == query {
        return 1.0;
    }
    if name.starts_with(query) {
        return 0.9;
    }
    if name.contains(query) {
        return 0.7;
    }
    positional_score(query, name)
}

/// Position-by-position character overlap over the shorter length,
/// normalized by the longer length, scaled to cap below the substring
/// tier.
fn positional_score(query: &str, name: &str) -> f64 {
    let query_len = query.chars().count();
    let name_len = name.chars().count();
    let longer = query_len.max(name_len);
    if longer == 0 {
        return 0.0;
    }
    let matching = query
        .chars()
        .zip(name.chars())
        .filter(|(a, b)| a == b)
        .count();
    matching as f64 / longer as f64 * 0.5
}
