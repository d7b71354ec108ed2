//! # ndl-api — Axum API Service
//!
//! Serves the external collaborator contracts the download page consumes,
//! backed by listing files loaded once at startup (no database, no object
//! storage client — presigned URLs come straight from the listing).
//!
//! ## Routes
//!
//! - `GET /v1/datalake/nuts?version=` — partition listing, optionally
//!   filtered to one format version, sorted by (version, nuts_id).
//! - `GET /v1/datalake/nuts/{version}/{nuts_id}` — a single partition.
//! - `GET /v1/datalake/nuts/{version}/{prefix}/bundle` — bundle manifest
//!   for every partition under a region prefix.
//! - `GET /v1/nuts/names` — region code → display name catalog.
//! - `GET /v1/countries` — country quick links.
//! - `GET /health/live`, `GET /health/ready` — probes (unauthenticated).
//!
//! ## Middleware Stack (Tower)
//!
//! TraceLayer → CorsLayer (the page is served from a different origin
//! than the API).
//!
//! ## Crate Policy
//!
//! - No business logic in route handlers — prefix semantics come from
//!   `ndl_core::RegionCode`, render semantics from `ndl-engine`.
//! - All errors map to structured HTTP responses via `AppError`.
//! - Missing or malformed listing files degrade to empty listings at
//!   startup; only the configuration file itself can fail the boot.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::AppState;

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/v1/datalake", routes::datalake::router())
        .nest("/v1/nuts", routes::names::router())
        .nest("/v1/countries", routes::countries::router())
        .nest("/health", routes::health::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn serve(state: AppState, bind: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(%bind, "ndl-api listening");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
