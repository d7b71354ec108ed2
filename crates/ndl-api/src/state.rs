//! # Application State
//!
//! Listings loaded once at startup and shared read-only across handlers.
//! Remote-data policy applies here too: a missing or malformed listing
//! file logs a warning and degrades to the empty listing.

use std::path::Path;
use std::sync::Arc;

use ndl_core::{
    parse_country_listing, parse_partition_listing, CountryRecord, DatalakeConfig,
    PartitionRecord, RegionCatalog,
};

#[derive(Debug)]
struct Listings {
    config: DatalakeConfig,
    partitions: Vec<PartitionRecord>,
    names: RegionCatalog,
    countries: Vec<CountryRecord>,
}

/// Shared application state passed to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<Listings>,
}

impl AppState {
    /// Load all listings named by the configuration.
    pub fn load(config: DatalakeConfig) -> Self {
        let partitions = parse_partition_listing(&read_or_empty(&config.partitions_path));
        let names = RegionCatalog::from_json(&read_or_empty(&config.names_path));
        let countries = parse_country_listing(&read_or_empty(&config.countries_path));
        tracing::info!(
            partitions = partitions.len(),
            names = names.len(),
            countries = countries.len(),
            "listings loaded"
        );
        Self::from_parts(config, partitions, names, countries)
    }

    /// Build state from already-parsed listings (tests, embedding).
    pub fn from_parts(
        config: DatalakeConfig,
        partitions: Vec<PartitionRecord>,
        names: RegionCatalog,
        countries: Vec<CountryRecord>,
    ) -> Self {
        Self {
            inner: Arc::new(Listings {
                config,
                partitions,
                names,
                countries,
            }),
        }
    }

    /// The service configuration.
    pub fn config(&self) -> &DatalakeConfig {
        &self.inner.config
    }

    /// The partition listing, in source order.
    pub fn partitions(&self) -> &[PartitionRecord] {
        &self.inner.partitions
    }

    /// The region name catalog.
    pub fn names(&self) -> &RegionCatalog {
        &self.inner.names
    }

    /// The country listing, sorted by name.
    pub fn countries(&self) -> &[CountryRecord] {
        &self.inner.countries
    }
}

fn read_or_empty(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "listing file unavailable; serving empty");
            String::new()
        }
    }
}
