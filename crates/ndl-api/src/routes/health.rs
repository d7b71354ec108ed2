//! # Health Probes
//!
//! Kubernetes-style liveness and readiness endpoints, unauthenticated.
//! Readiness reflects the degrade-not-hang policy: the service is ready
//! even with empty listings, since that is a valid degraded state.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/live", get(live))
        .route("/ready", get(ready))
}

async fn live() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn ready(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "partitions": state.partitions().len(),
        "names": state.names().len(),
        "countries": state.countries().len(),
    }))
}
