//! # Datalake Routes
//!
//! Partition listings and bundle manifests. The bundle endpoint returns a
//! manifest naming every file under the region prefix; actual archive
//! assembly is the object store's concern, not this service's.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use ndl_core::partition::{FileRef, PartitionRecord};
use ndl_core::RegionCode;

use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/nuts", get(list_partitions))
        .route("/nuts/{version}/{nuts_id}", get(get_partition))
        .route("/nuts/{version}/{nuts_id}/bundle", get(bundle_manifest))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    version: Option<String>,
}

/// Everything a client needs to assemble one bundle download.
#[derive(Debug, Serialize)]
pub struct BundleManifest {
    /// Format version of the bundled partitions.
    pub version: String,
    /// The resolved region prefix.
    pub nuts_prefix: String,
    /// Suggested archive filename.
    pub filename: String,
    /// Number of files in the bundle.
    pub object_count: usize,
    /// Sum of file sizes in bytes.
    pub total_size_bytes: u64,
    /// The files, in listing order.
    pub files: Vec<FileRef>,
}

/// List partitions, optionally restricted to one format version. Output
/// is sorted by (version, nuts_id) for stable, predictable responses.
async fn list_partitions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<PartitionRecord>> {
    metrics::counter!("ndl_api_requests_total", "route" => "list_partitions").increment(1);
    let mut records: Vec<PartitionRecord> = state
        .partitions()
        .iter()
        .filter(|p| {
            query
                .version
                .as_deref()
                .map_or(true, |version| p.version == version)
        })
        .cloned()
        .collect();
    records.sort_by(|a, b| {
        a.version
            .cmp(&b.version)
            .then_with(|| a.nuts_id.cmp(&b.nuts_id))
    });
    Json(records)
}

/// A single (version, nuts_id) partition.
async fn get_partition(
    State(state): State<AppState>,
    Path((version, nuts_id)): Path<(String, String)>,
) -> Result<Json<PartitionRecord>, AppError> {
    metrics::counter!("ndl_api_requests_total", "route" => "get_partition").increment(1);
    state
        .partitions()
        .iter()
        .find(|p| p.version == version && p.nuts_id.eq_ignore_ascii_case(&nuts_id))
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("partition {version}/{nuts_id}")))
}

/// Bundle manifest for every partition under a region prefix.
async fn bundle_manifest(
    State(state): State<AppState>,
    Path((version, nuts_id)): Path<(String, String)>,
) -> Result<Json<BundleManifest>, AppError> {
    metrics::counter!("ndl_api_requests_total", "route" => "bundle").increment(1);
    let prefix = RegionCode::parse(&nuts_id)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let files: Vec<FileRef> = state
        .partitions()
        .iter()
        .filter(|p| p.version == version && prefix.matches_prefix_of_raw(&p.nuts_id))
        .flat_map(|p| p.files.iter().cloned())
        .collect();

    if files.is_empty() {
        return Err(AppError::NotFound(format!(
            "no files found for NUTS prefix {prefix}"
        )));
    }

    let total_size_bytes = files.iter().map(|f| f.size_bytes).sum();
    Ok(Json(BundleManifest {
        filename: format!("nuts_{version}_{prefix}.zip"),
        object_count: files.len(),
        total_size_bytes,
        version,
        nuts_prefix: prefix.to_string(),
        files,
    }))
}
