//! # Country Routes
//!
//! Country quick links: the pre-built country-wide archives offered next
//! to the NUTS search.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use ndl_core::CountryRecord;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_countries))
}

/// All countries, sorted by display name at load time.
async fn list_countries(State(state): State<AppState>) -> Json<Vec<CountryRecord>> {
    metrics::counter!("ndl_api_requests_total", "route" => "countries").increment(1);
    Json(state.countries().to_vec())
}
