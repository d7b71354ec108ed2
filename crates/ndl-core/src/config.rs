//! # Configuration
//!
//! Operator configuration for the API service and the CLI, loaded from a
//! YAML file. Unlike remote data, configuration does not degrade silently:
//! a missing file falls back to defaults, but a malformed file is an error
//! at startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::NdlError;

/// Datalake configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatalakeConfig {
    /// Base URL prepended to API paths (bundle URLs are derived from it).
    pub api_base: String,
    /// Format version served by default.
    pub version: String,
    /// Path to the partition listing JSON file.
    pub partitions_path: PathBuf,
    /// Path to the region name catalog JSON file.
    pub names_path: PathBuf,
    /// Path to the country listing JSON file.
    pub countries_path: PathBuf,
    /// Bind address for `ndl serve`.
    pub bind: String,
}

impl Default for DatalakeConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8001/v1".to_string(),
            version: "v0.2".to_string(),
            partitions_path: PathBuf::from("data/partitions.json"),
            names_path: PathBuf::from("data/nuts_names.json"),
            countries_path: PathBuf::from("data/countries.json"),
            bind: "0.0.0.0:8001".to_string(),
        }
    }
}

impl DatalakeConfig {
    /// Load configuration from a YAML file. A missing file yields the
    /// defaults; a present but malformed file is an error.
    pub fn load(path: &Path) -> Result<Self, NdlError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&raw).map_err(|e| NdlError::Config(e.to_string()))
    }

    /// The API base with any trailing slash removed, so URL assembly can
    /// always join with a single `/`.
    pub fn api_base_trimmed(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}
