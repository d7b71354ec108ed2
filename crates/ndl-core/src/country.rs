//! # Country Quick Links
//!
//! Wire shape for the country listing used by the country-level quick
//! links outside the resolution engine. Each country may carry a
//! pre-built GeoPackage and/or CSV archive.

use serde::{Deserialize, Serialize};

/// A pre-built country-wide download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileLink {
    /// Direct download URL.
    pub download_link: String,
    /// Size in decimal megabytes, as published by the source.
    pub size_in_mb: f64,
}

/// One entry of the country listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Source-assigned numeric identifier.
    pub id: u64,
    /// Country display name.
    pub name: String,
    /// Country-wide GeoPackage archive, when pre-built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpkg: Option<FileLink>,
    /// Country-wide CSV archive, when pre-built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv: Option<FileLink>,
}

/// Parse the remote country listing, sorted by display name. Any failure
/// yields the empty list.
pub fn parse_country_listing(raw: &str) -> Vec<CountryRecord> {
    let mut countries: Vec<CountryRecord> = serde_json::from_str(raw).unwrap_or_default();
    countries.sort_by(|a, b| a.name.cmp(&b.name));
    countries
}
