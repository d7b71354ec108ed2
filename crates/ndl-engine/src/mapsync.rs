//! # Map Filter Derivation
//!
//! Derives the per-layer filter predicates the map collaborator must apply
//! for the current selection, and pushes them through an injected
//! [`MapBackend`] capability.
//!
//! ## Filter Contract
//!
//! Predicates are boolean expressions over the per-feature attributes
//! `nuts_id` and `nuts_level`. [`FilterExpr::to_expression`] serializes to
//! the MapLibre array form (`["any", ...]`, `["==", ["get", ...], ...]`,
//! with the prefix test spelled as a `slice` comparison), which is the
//! exact shape `setFilter` consumes.
//!
//! With no selection the fill/outline layers show only country-level
//! features and the highlight layer matches nothing. With a selection they
//! show countries as context, the selection's children one level down, and
//! the selected feature itself; the highlight layer matches exactly the
//! selected feature.

use ndl_core::RegionCode;
use serde_json::{json, Value};

use crate::resolver::MapFeature;
use crate::selection::SelectionState;

/// Fill layer name in the map style.
pub const LAYER_FILL: &str = "nuts-fill";
/// Outline layer name in the map style.
pub const LAYER_OUTLINE: &str = "nuts-outline";
/// Selection highlight layer name in the map style.
pub const LAYER_SELECTED: &str = "nuts-selected";

/// A boolean predicate over map feature attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterExpr {
    /// `nuts_level == n`
    LevelEquals(u8),
    /// `nuts_id == id` (exact; an empty id matches no feature)
    IdEquals(String),
    /// `nuts_id` starts with `prefix`
    IdHasPrefix(String),
    /// Conjunction.
    All(Vec<FilterExpr>),
    /// Disjunction.
    Any(Vec<FilterExpr>),
}

impl FilterExpr {
    /// Evaluate the predicate against a feature's attributes.
    pub fn matches(&self, feature: &MapFeature) -> bool {
        match self {
            Self::LevelEquals(level) => feature.nuts_level == *level,
            Self::IdEquals(id) => !id.is_empty() && feature.nuts_id == *id,
            Self::IdHasPrefix(prefix) => feature.nuts_id.starts_with(prefix),
            Self::All(parts) => parts.iter().all(|p| p.matches(feature)),
            Self::Any(parts) => parts.iter().any(|p| p.matches(feature)),
        }
    }

    /// The MapLibre expression array for this predicate.
    pub fn to_expression(&self) -> Value {
        match self {
            Self::LevelEquals(level) => json!(["==", ["get", "nuts_level"], level]),
            Self::IdEquals(id) => json!(["==", ["get", "nuts_id"], id]),
            Self::IdHasPrefix(prefix) => {
                json!(["==", ["slice", ["get", "nuts_id"], 0, prefix.len()], prefix])
            }
            Self::All(parts) => combine("all", parts),
            Self::Any(parts) => combine("any", parts),
        }
    }
}

fn combine(op: &str, parts: &[FilterExpr]) -> Value {
    let mut expr = vec![json!(op)];
    expr.extend(parts.iter().map(FilterExpr::to_expression));
    Value::Array(expr)
}

/// The complete per-layer predicate set for one selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapFilterSet {
    /// Predicate for [`LAYER_FILL`].
    pub fill: FilterExpr,
    /// Predicate for [`LAYER_OUTLINE`].
    pub outline: FilterExpr,
    /// Predicate for [`LAYER_SELECTED`].
    pub selected: FilterExpr,
}

impl MapFilterSet {
    /// Iterate (layer name, predicate) pairs in style order.
    pub fn layers(&self) -> [(&'static str, &FilterExpr); 3] {
        [
            (LAYER_FILL, &self.fill),
            (LAYER_OUTLINE, &self.outline),
            (LAYER_SELECTED, &self.selected),
        ]
    }
}

/// Derive the per-layer predicates for a selection state.
pub fn derive_filters(state: &SelectionState) -> MapFilterSet {
    match state.code() {
        None => MapFilterSet {
            fill: FilterExpr::LevelEquals(0),
            outline: FilterExpr::LevelEquals(0),
            selected: FilterExpr::IdEquals(String::new()),
        },
        Some(code) => {
            let visible = visible_filter(code);
            MapFilterSet {
                fill: visible.clone(),
                outline: visible,
                selected: FilterExpr::IdEquals(code.to_string()),
            }
        }
    }
}

/// Countries as context, the selection's children one level down, and the
/// selected feature itself.
fn visible_filter(code: &RegionCode) -> FilterExpr {
    FilterExpr::Any(vec![
        FilterExpr::LevelEquals(0),
        FilterExpr::All(vec![
            FilterExpr::LevelEquals(code.child_level()),
            FilterExpr::IdHasPrefix(code.to_string()),
        ]),
        FilterExpr::IdEquals(code.to_string()),
    ])
}

/// The injected map capability. The engine only needs readiness and
/// filter application; click and hover events flow the other way, into
/// [`crate::engine::Engine::on_map_click`].
pub trait MapBackend {
    /// Whether the style has loaded and filters can be applied.
    fn is_ready(&self) -> bool;

    /// Apply a predicate to a named layer.
    fn set_filter(&mut self, layer: &str, filter: &FilterExpr);
}

/// Push a filter set to a backend, if it is ready. Returns whether the
/// push happened (the engine re-pushes on map-ready when it did not).
pub fn push_filters(backend: &mut dyn MapBackend, filters: &MapFilterSet) -> bool {
    if !backend.is_ready() {
        return false;
    }
    for (layer, filter) in filters.layers() {
        backend.set_filter(layer, filter);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Resolution;
    use ndl_core::RegionCode;

    fn feature(id: &str, level: u8) -> MapFeature {
        MapFeature {
            nuts_id: id.to_string(),
            nuts_level: level,
        }
    }

    fn selected(code: &str) -> SelectionState {
        let mut state = SelectionState::default();
        state.apply(Resolution::Resolved(RegionCode::parse(code).unwrap()));
        state
    }

    #[test]
    fn test_empty_state_shows_countries_only() {
        let filters = derive_filters(&SelectionState::Empty);
        assert!(filters.fill.matches(&feature("DE", 0)));
        assert!(!filters.fill.matches(&feature("DE1", 1)));
        // Highlight matches nothing, including features at level 0.
        assert!(!filters.selected.matches(&feature("DE", 0)));
    }

    #[test]
    fn test_selected_shows_context_children_and_self() {
        let filters = derive_filters(&selected("DE1"));
        // Countries stay visible as context.
        assert!(filters.fill.matches(&feature("FR", 0)));
        // Children of the selection sit one level below its own encoded
        // level: a three-character code encodes level 2, children at 3.
        assert!(filters.fill.matches(&feature("DE12", 3)));
        assert!(!filters.fill.matches(&feature("FR12", 3)));
        // The selected feature itself.
        assert!(filters.fill.matches(&feature("DE1", 1)));
        // Unrelated intermediate levels are hidden.
        assert!(!filters.fill.matches(&feature("DE2", 1)));
    }

    #[test]
    fn test_highlight_matches_exactly_the_selection() {
        let filters = derive_filters(&selected("DE1"));
        assert!(filters.selected.matches(&feature("DE1", 1)));
        assert!(!filters.selected.matches(&feature("DE12", 2)));
        assert!(!filters.selected.matches(&feature("DE", 0)));
    }

    #[test]
    fn test_children_level_clamps_at_three() {
        let filters = derive_filters(&selected("DE123"));
        // Children of a level-3 code stay at level 3.
        assert!(filters.fill.matches(&feature("DE123", 3)));
        let expr = filters.fill.to_expression();
        let rendered = expr.to_string();
        assert!(rendered.contains("\"nuts_level\"],3"));
    }

    #[test]
    fn test_children_level_is_next_after_encoded_level() {
        // A code of length n encodes level n − 1 (clamped); its children
        // predicate targets the next level down.
        for (code, child_level) in [("DE", 2), ("DE1", 3), ("DE12", 3)] {
            let filters = derive_filters(&selected(code));
            let child_id = format!("{code}X");
            assert!(
                filters.fill.matches(&feature(&child_id, child_level)),
                "children of {code} should show at level {child_level}"
            );
            assert!(!filters.fill.matches(&feature(&child_id, child_level - 1)));
        }
    }

    #[test]
    fn test_expression_shape_matches_style_contract() {
        let filters = derive_filters(&selected("DE1"));
        let expr = filters.fill.to_expression();
        assert_eq!(expr[0], "any");
        assert_eq!(
            expr[1],
            serde_json::json!(["==", ["get", "nuts_level"], 0])
        );
        assert_eq!(
            expr[2],
            serde_json::json!([
                "all",
                ["==", ["get", "nuts_level"], 3],
                ["==", ["slice", ["get", "nuts_id"], 0, 3], "DE1"]
            ])
        );
        assert_eq!(expr[3], serde_json::json!(["==", ["get", "nuts_id"], "DE1"]));

        let empty = derive_filters(&SelectionState::Empty);
        assert_eq!(
            empty.selected.to_expression(),
            serde_json::json!(["==", ["get", "nuts_id"], ""])
        );
    }
}
