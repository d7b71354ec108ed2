//! # Partition Query
//!
//! Derives the render-ready view of the partition listing from the current
//! selection: table rows for every partition under the selected prefix,
//! plus the bundle-download URL, or the appropriate empty-state message.
//!
//! ## Ordering
//!
//! Rows preserve the source listing's order — no additional sort.

use ndl_core::{RegionCatalog, RegionCode};
use ndl_core::partition::PartitionRecord;
use serde::Serialize;

use crate::selection::SelectionState;

/// Display name used when the catalog has no entry for a partition's code.
const UNKNOWN_REGION: &str = "Unknown region";

/// One render-ready table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderRow {
    /// Region identifier as published by the partition source.
    pub nuts_id: String,
    /// Display name from the catalog, or `"Unknown region"`.
    pub region_name: String,
    /// Download URL of the partition's primary file.
    pub file_url: String,
    /// Rounded size of that file in megabytes.
    pub size_mb: u64,
}

/// The up-to-date table/prompt/error state for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderModel {
    /// Listings have not finished loading; nothing to show yet.
    Loading,
    /// Nothing selected and nothing attempted: invite the user to search.
    Prompt,
    /// Input was attempted but the partition listing is empty
    /// (failed or absent load).
    Unavailable,
    /// The input resolved (or was typed) but matched zero partitions.
    NoMatch {
        /// The input that failed to match, for the message.
        query: String,
    },
    /// Matching partitions, one row each, plus the bundle target.
    Rows {
        /// Table rows in source listing order.
        rows: Vec<RenderRow>,
        /// Bundle-download URL for the whole selection.
        bundle_url: String,
    },
}

impl RenderModel {
    /// The user-facing message for non-table states.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Loading => Some("Loading datalake listings.".to_string()),
            Self::Prompt => {
                Some("Select a country or NUTS code to see downloads.".to_string())
            }
            Self::Unavailable => Some("No partitions available.".to_string()),
            Self::NoMatch { query } => Some(format!("No partitions match {query}.")),
            Self::Rows { .. } => None,
        }
    }

    /// The bundle URL, present only while the selection yields at least
    /// one match.
    pub fn bundle_url(&self) -> Option<&str> {
        match self {
            Self::Rows { bundle_url, .. } => Some(bundle_url),
            _ => None,
        }
    }
}

/// Derive the render model from the selection and the loaded listings.
///
/// `attempted` carries the raw input of the latest resolution attempt when
/// that input was non-empty, so an empty selection after a failed attempt
/// renders a no-match message instead of the initial prompt.
pub fn render(
    state: &SelectionState,
    attempted: Option<&str>,
    catalog: &RegionCatalog,
    partitions: &[PartitionRecord],
    api_base: &str,
) -> RenderModel {
    match state {
        SelectionState::Empty => match attempted {
            None => RenderModel::Prompt,
            Some(_) if partitions.is_empty() => RenderModel::Unavailable,
            Some(query) => RenderModel::NoMatch {
                query: query.to_string(),
            },
        },
        SelectionState::Selected(code) => {
            if partitions.is_empty() {
                return RenderModel::Unavailable;
            }
            render_selected(code, catalog, partitions, api_base)
        }
    }
}

fn render_selected(
    code: &RegionCode,
    catalog: &RegionCatalog,
    partitions: &[PartitionRecord],
    api_base: &str,
) -> RenderModel {
    let matches: Vec<&PartitionRecord> = partitions
        .iter()
        .filter(|p| code.matches_prefix_of_raw(&p.nuts_id))
        .collect();

    if matches.is_empty() {
        return RenderModel::NoMatch {
            query: code.to_string(),
        };
    }

    let rows = matches
        .iter()
        .filter_map(|record| {
            let file = record.primary_file()?;
            let region_name = RegionCode::parse(&record.nuts_id)
                .ok()
                .and_then(|c| catalog.name_of(&c).map(str::to_string))
                .unwrap_or_else(|| UNKNOWN_REGION.to_string());
            Some(RenderRow {
                nuts_id: record.nuts_id.clone(),
                region_name,
                file_url: file.presigned_url.clone(),
                size_mb: file.size_mb(),
            })
        })
        .collect();

    // Mixed versions across matches are not expected to occur; the first
    // match's version wins.
    let bundle_url = bundle_url(api_base, &matches[0].version, code);

    RenderModel::Rows { rows, bundle_url }
}

/// Assemble the bundle-download URL for a resolved code.
pub fn bundle_url(api_base: &str, version: &str, code: &RegionCode) -> String {
    format!(
        "{}/datalake/nuts/{}/{}/bundle",
        api_base.trim_end_matches('/'),
        version,
        code
    )
}
