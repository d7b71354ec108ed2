//! # Listing IO
//!
//! Loads the three listing files named by the configuration, applying the
//! same policy as the service: a missing or malformed file logs a warning
//! and degrades to the empty listing.

use std::path::Path;

use ndl_core::{
    parse_country_listing, parse_partition_listing, CountryRecord, DatalakeConfig,
    PartitionRecord, RegionCatalog,
};

/// All listings a subcommand may need.
#[derive(Debug)]
pub struct Listings {
    /// Region code → display name.
    pub catalog: RegionCatalog,
    /// Partition listing in source order.
    pub partitions: Vec<PartitionRecord>,
    /// Countries sorted by name.
    pub countries: Vec<CountryRecord>,
}

/// Load every listing named by the configuration.
pub fn load(config: &DatalakeConfig) -> Listings {
    Listings {
        catalog: RegionCatalog::from_json(&read_or_empty(&config.names_path)),
        partitions: parse_partition_listing(&read_or_empty(&config.partitions_path)),
        countries: parse_country_listing(&read_or_empty(&config.countries_path)),
    }
}

fn read_or_empty(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "listing file unavailable; using empty");
            String::new()
        }
    }
}
