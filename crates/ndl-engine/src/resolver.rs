//! # Identifier Resolver
//!
//! Turns any of the three input events — code-field text, name-field text,
//! or a map click — into a single canonical region code, or `Unresolved`.
//!
//! ## Input Modes
//!
//! The two text fields are mutually exclusive modes, never simultaneously
//! authoritative. [`ActiveMode`] makes that an explicit, visible state:
//! whichever mode produced the latest resolution owns the input, and the
//! engine clears the other field's raw text (the selection itself is
//! untouched by the clearing).

use ndl_core::{RegionCatalog, RegionCode};
use serde::{Deserialize, Serialize};

use crate::matcher::FuzzyMatcher;

/// Which text field currently owns the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveMode {
    /// The code field was edited last.
    Code,
    /// The name field was edited last.
    Name,
}

/// Outcome of resolving one input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Input named a region.
    Resolved(RegionCode),
    /// Input named nothing; the selection clears.
    Unresolved,
}

impl Resolution {
    /// The resolved code, if any.
    pub fn code(&self) -> Option<&RegionCode> {
        match self {
            Self::Resolved(code) => Some(code),
            Self::Unresolved => None,
        }
    }
}

/// A map feature under a click point, as reported by the map collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFeature {
    /// The feature's region identifier attribute.
    pub nuts_id: String,
    /// The feature's region level attribute.
    pub nuts_level: u8,
}

/// Resolve code-field text: the trimmed, upper-cased text is the candidate
/// prefix verbatim. No fuzzy matching. Empty or malformed text is
/// unresolved.
pub fn resolve_code(text: &str) -> Resolution {
    match RegionCode::parse(text) {
        Ok(code) => Resolution::Resolved(code),
        Err(_) => Resolution::Unresolved,
    }
}

/// Resolve name-field text against the catalog.
///
/// An accepted suggestion of the form `"<anything> [CODE]"` short-circuits
/// to the bracketed code. Otherwise: exact case-insensitive name match
/// first, then the single top fuzzy result, then unresolved.
pub fn resolve_name(text: &str, catalog: &RegionCatalog) -> Resolution {
    let text = text.trim();
    if text.is_empty() {
        return Resolution::Unresolved;
    }
    if let Some(code) = accepted_suggestion_code(text) {
        return Resolution::Resolved(code);
    }
    if let Some(code) = catalog.code_for_name(text) {
        return Resolution::Resolved(code.clone());
    }
    match FuzzyMatcher::new(catalog).best(text) {
        Some(candidate) => Resolution::Resolved(candidate.code),
        None => Resolution::Unresolved,
    }
}

/// Resolve a map click from the features intersecting the click point:
/// the most specific (highest-level) feature wins. Among equal levels the
/// first reported feature wins. No feature, or a feature with a malformed
/// identifier, is unresolved.
pub fn resolve_map_click(features: &[MapFeature]) -> Resolution {
    let mut best: Option<&MapFeature> = None;
    for feature in features {
        match best {
            Some(current) if feature.nuts_level <= current.nuts_level => {}
            _ => best = Some(feature),
        }
    }
    match best {
        Some(feature) => resolve_code(&feature.nuts_id),
        None => Resolution::Unresolved,
    }
}

/// Extract the bracketed code from an accepted suggestion
/// (`"Name [CODE]"`). Returns `None` when the text is not in suggestion
/// form or the bracketed part is not a valid code.
fn accepted_suggestion_code(text: &str) -> Option<RegionCode> {
    let text = text.trim();
    let inner = text.strip_suffix(']')?;
    let open = inner.rfind('[')?;
    RegionCode::parse(&inner[open + 1..]).ok()
}
