//! # Region Name Routes
//!
//! The region name catalog the download page loads at session start, plus
//! a server-side suggestion endpoint backed by the engine's fuzzy matcher.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use ndl_core::RegionCatalog;
use ndl_engine::{FuzzyMatcher, DEFAULT_SHORTLIST};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/names", get(names))
        .route("/suggest", get(suggest))
}

#[derive(Debug, Deserialize)]
struct SuggestQuery {
    q: String,
    limit: Option<usize>,
}

/// One ranked suggestion for a free-text query.
#[derive(Debug, Serialize)]
pub struct Suggestion {
    /// Region code of the suggested entry.
    pub code: String,
    /// Display name of the suggested entry.
    pub name: String,
    /// Heuristic relevance in [0, 1].
    pub score: f64,
    /// The `"Name [CODE]"` form the client can feed back verbatim.
    pub label: String,
}

/// The full code → name catalog as a JSON object.
async fn names(State(state): State<AppState>) -> Json<RegionCatalog> {
    metrics::counter!("ndl_api_requests_total", "route" => "names").increment(1);
    Json(state.names().clone())
}

/// Ranked fuzzy suggestions for a free-text query. Queries below the
/// engine's minimum length yield an empty list, not an error.
async fn suggest(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Json<Vec<Suggestion>> {
    metrics::counter!("ndl_api_requests_total", "route" => "suggest").increment(1);
    let limit = query.limit.unwrap_or(DEFAULT_SHORTLIST);
    let suggestions = FuzzyMatcher::new(state.names())
        .top_matches(&query.q, limit)
        .into_iter()
        .map(|candidate| Suggestion {
            code: candidate.code.to_string(),
            name: candidate.name.clone(),
            score: candidate.score,
            label: candidate.suggestion_label(),
        })
        .collect();
    Json(suggestions)
}
