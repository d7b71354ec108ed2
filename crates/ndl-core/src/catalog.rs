//! # Region Name Catalog
//!
//! Immutable-per-session mapping from region code to display name, loaded
//! once from the remote name source at session start.
//!
//! ## Degraded State
//!
//! An empty catalog is valid: lookups simply miss and callers fall back to
//! a placeholder name. A failed or malformed load therefore produces
//! `RegionCatalog::default()`, never an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::region::RegionCode;

/// Mapping from region code to human-readable display name.
///
/// Read-only after construction. Keys are normalized through `RegionCode`
/// during deserialization, so lookups with any casing of the same code hit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionCatalog {
    names: BTreeMap<RegionCode, String>,
}

impl RegionCatalog {
    /// Build a catalog from (code, name) pairs. Malformed codes are
    /// dropped rather than failing the whole catalog.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let names = pairs
            .into_iter()
            .filter_map(|(code, name)| {
                let code = RegionCode::parse(code.as_ref()).ok()?;
                Some((code, name.as_ref().to_string()))
            })
            .collect();
        Self { names }
    }

    /// Parse a catalog from the remote source's JSON object shape.
    /// Any failure yields the empty catalog.
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// Display name for a code, if the catalog knows it.
    pub fn name_of(&self, code: &RegionCode) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Find the code whose display name equals `name` case-insensitively.
    pub fn code_for_name(&self, name: &str) -> Option<&RegionCode> {
        let wanted = name.trim().to_lowercase();
        self.names
            .iter()
            .find(|(_, n)| n.to_lowercase() == wanted)
            .map(|(code, _)| code)
    }

    /// Iterate entries in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&RegionCode, &str)> {
        self.names.iter().map(|(code, name)| (code, name.as_str()))
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the catalog holds no entries (the degraded state).
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RegionCatalog {
        RegionCatalog::from_pairs([("DE", "Germany"), ("DE1", "Baden-Württemberg")])
    }

    #[test]
    fn test_name_lookup_is_case_normalized() {
        let catalog = sample();
        let code = RegionCode::parse("de1").unwrap();
        assert_eq!(catalog.name_of(&code), Some("Baden-Württemberg"));
    }

    #[test]
    fn test_code_for_name_case_insensitive() {
        let catalog = sample();
        let code = catalog.code_for_name("  gErMaNy ").unwrap();
        assert_eq!(code.as_str(), "DE");
        assert!(catalog.code_for_name("Atlantis").is_none());
    }

    #[test]
    fn test_from_json_tolerates_garbage() {
        assert!(RegionCatalog::from_json("not json").is_empty());
        assert!(RegionCatalog::from_json("[]").is_empty());
        let catalog = RegionCatalog::from_json(r#"{"DE":"Germany"}"#);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_malformed_keys_are_dropped_not_fatal() {
        let catalog = RegionCatalog::from_pairs([("DE", "Germany"), ("", "Nowhere")]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = RegionCatalog::default();
        assert!(catalog.is_empty());
        let code = RegionCode::parse("DE").unwrap();
        assert_eq!(catalog.name_of(&code), None);
    }
}
