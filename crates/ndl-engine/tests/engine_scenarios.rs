//! End-to-end engine scenarios: interleaved edits across the three input
//! sources, debounce windows driven by hand, and a recording fake standing
//! in for the map collaborator.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use ndl_core::partition::{FileRef, PartitionRecord};
use ndl_core::RegionCatalog;
use ndl_engine::{
    Engine, FilterExpr, MapBackend, MapFeature, RenderModel, LAYER_SELECTED, REFRESH_WINDOW,
    SUGGEST_WINDOW,
};

const BASE: &str = "https://api.example.test/v1";

#[derive(Debug, Default)]
struct FakeMapInner {
    ready: bool,
    filters: HashMap<String, FilterExpr>,
    set_filter_calls: usize,
}

/// Recording fake for the map collaborator: captures the last filter per
/// layer so tests can assert on what the engine pushed.
#[derive(Debug, Clone, Default)]
struct FakeMap(Rc<RefCell<FakeMapInner>>);

impl FakeMap {
    fn ready() -> Self {
        let map = Self::default();
        map.0.borrow_mut().ready = true;
        map
    }

    fn filter(&self, layer: &str) -> Option<FilterExpr> {
        self.0.borrow().filters.get(layer).cloned()
    }
}

impl MapBackend for FakeMap {
    fn is_ready(&self) -> bool {
        self.0.borrow().ready
    }

    fn set_filter(&mut self, layer: &str, filter: &FilterExpr) {
        let mut inner = self.0.borrow_mut();
        inner.set_filter_calls += 1;
        inner.filters.insert(layer.to_string(), filter.clone());
    }
}

fn catalog() -> RegionCatalog {
    RegionCatalog::from_pairs([("DE", "Germany"), ("DE1", "Baden-Württemberg")])
}

fn partition(nuts_id: &str, version: &str, key: &str, size: u64, url: &str) -> PartitionRecord {
    PartitionRecord {
        nuts_id: nuts_id.to_string(),
        version: version.to_string(),
        files: vec![FileRef {
            key: key.to_string(),
            size_bytes: size,
            presigned_url: url.to_string(),
        }],
    }
}

fn feature(id: &str, level: u8) -> MapFeature {
    MapFeature {
        nuts_id: id.to_string(),
        nuts_level: level,
    }
}

/// Engine with both listings loaded and a ready fake map attached.
fn loaded_engine(partitions: Vec<PartitionRecord>) -> (Engine, FakeMap) {
    let mut engine = Engine::new(BASE);
    let map = FakeMap::ready();
    engine.set_map_backend(Box::new(map.clone()));
    engine.on_catalog_loaded(catalog());
    engine.on_partitions_loaded(partitions);
    (engine, map)
}

fn settle(engine: &mut Engine, from: Instant) -> Instant {
    let later = from + REFRESH_WINDOW + Duration::from_millis(1);
    engine.poll(later);
    later
}

// ─── Scenario A: code-field input renders one row ───────────────────

#[test]
fn scenario_code_input_renders_row_and_bundle() {
    let (mut engine, _map) = loaded_engine(vec![partition(
        "DE1", "v0.2", "k.parquet", 2_000_000, "url1",
    )]);
    let start = Instant::now();
    engine.on_code_input("DE1", start);
    settle(&mut engine, start);

    match engine.current_render_model() {
        RenderModel::Rows { rows, bundle_url } => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].nuts_id, "DE1");
            assert_eq!(rows[0].region_name, "Baden-Württemberg");
            assert_eq!(rows[0].size_mb, 2);
            assert_eq!(rows[0].file_url, "url1");
            assert!(bundle_url.ends_with("/v0.2/DE1/bundle"));
        }
        other => panic!("expected rows, got {other:?}"),
    }
    assert_eq!(engine.bundle_url(), engine.current_render_model().bundle_url());
}

// ─── Scenario B: suggestion accept resolves to its code ─────────────

#[test]
fn scenario_name_suggestion_accept_selects_code() {
    let (mut engine, _map) = loaded_engine(vec![partition(
        "DE1", "v0.2", "k.parquet", 2_000_000, "url1",
    )]);
    let start = Instant::now();
    engine.on_name_input("Germa", start);

    // Suggestions appear after their own (shorter) window.
    engine.poll(start + SUGGEST_WINDOW);
    let labels: Vec<String> = engine
        .suggestions()
        .iter()
        .map(|c| c.suggestion_label())
        .collect();
    assert_eq!(labels.first().map(String::as_str), Some("Germany [DE]"));

    // Accepting the suggestion re-enters through the name field.
    let accept_at = settle(&mut engine, start);
    engine.on_name_input("Germany [DE]", accept_at);
    settle(&mut engine, accept_at);
    assert_eq!(engine.selection().code().unwrap().as_str(), "DE");
}

#[test]
fn suggestion_accept_ignores_label_casing_and_punctuation() {
    let (mut engine, _map) = loaded_engine(vec![partition(
        "DE1", "v0.2", "k.parquet", 1, "url1",
    )]);
    let start = Instant::now();
    engine.on_name_input("bAdEn?! [de1]", start);
    settle(&mut engine, start);
    assert_eq!(engine.selection().code().unwrap().as_str(), "DE1");
}

// ─── Scenario C: no matching partitions resets everything ───────────

#[test]
fn scenario_unmatched_code_resets_selection_and_highlight() {
    let (mut engine, map) = loaded_engine(vec![partition(
        "DE1", "v0.2", "k.parquet", 1, "url1",
    )]);
    let start = Instant::now();
    engine.on_code_input("ZZ", start);
    settle(&mut engine, start);

    assert_eq!(
        engine.current_render_model().message().unwrap(),
        "No partitions match ZZ."
    );
    assert!(engine.selection().is_empty());
    let highlight = map.filter(LAYER_SELECTED).unwrap();
    assert!(!highlight.matches(&feature("ZZ", 1)));
    assert!(!highlight.matches(&feature("DE1", 1)));
}

// ─── Scenario D: failed loads degrade, never fail ───────────────────

#[test]
fn scenario_empty_listings_degrade_gracefully() {
    let (mut engine, _map) = loaded_engine(Vec::new());
    let mut engine2 = Engine::new(BASE);
    engine2.on_catalog_loaded(RegionCatalog::default());
    engine2.on_partitions_loaded(Vec::new());

    let start = Instant::now();
    for e in [&mut engine, &mut engine2] {
        e.on_code_input("DE", start);
        settle(e, start);
        assert_eq!(*e.current_render_model(), RenderModel::Unavailable);
        let later = settle(e, start);
        e.on_name_input("Germany", later);
        settle(e, later);
        assert!(e.current_render_model().message().is_some());
    }
}

// ─── Map clicks ─────────────────────────────────────────────────────

#[test]
fn map_click_applies_immediately_and_is_idempotent() {
    let (mut engine, _map) = loaded_engine(vec![
        partition("DE1", "v0.2", "a.parquet", 1, "u1"),
        partition("DE12", "v0.2", "b.parquet", 1, "u2"),
    ]);

    let features = [feature("DE", 0), feature("DE1", 1)];
    engine.on_map_click(&features);
    // No poll needed: clicks bypass the debounce windows.
    assert_eq!(engine.selection().code().unwrap().as_str(), "DE1");
    assert_eq!(engine.code_field(), "DE1");
    let first_render = engine.current_render_model().clone();

    engine.on_map_click(&features);
    assert_eq!(engine.selection().code().unwrap().as_str(), "DE1");
    assert_eq!(*engine.current_render_model(), first_render);
}

#[test]
fn map_click_outside_features_clears_selection() {
    let (mut engine, _map) = loaded_engine(vec![partition(
        "DE1", "v0.2", "a.parquet", 1, "u1",
    )]);
    let start = Instant::now();
    engine.on_code_input("DE1", start);
    settle(&mut engine, start);
    assert!(!engine.selection().is_empty());

    engine.on_map_click(&[]);
    assert!(engine.selection().is_empty());
    assert_eq!(engine.code_field(), "");
    assert_eq!(*engine.current_render_model(), RenderModel::Prompt);
}

#[test]
fn map_click_supersedes_pending_keystroke() {
    let (mut engine, _map) = loaded_engine(vec![
        partition("DE1", "v0.2", "a.parquet", 1, "u1"),
        partition("FR1", "v0.2", "b.parquet", 1, "u2"),
    ]);
    let start = Instant::now();
    engine.on_code_input("FR", start);
    engine.on_map_click(&[feature("DE1", 1)]);
    // The pending FR refresh was cancelled; a later poll must not undo
    // the click.
    settle(&mut engine, start);
    assert_eq!(engine.selection().code().unwrap().as_str(), "DE1");
}

// ─── Map filter push discipline ─────────────────────────────────────

#[test]
fn filters_push_on_every_transition_and_on_map_ready() {
    let map = FakeMap::default(); // not ready yet
    let mut engine = Engine::new(BASE);
    engine.set_map_backend(Box::new(map.clone()));
    engine.on_catalog_loaded(catalog());
    engine.on_partitions_loaded(vec![partition("DE1", "v0.2", "a.parquet", 1, "u1")]);

    let start = Instant::now();
    engine.on_code_input("DE1", start);
    settle(&mut engine, start);
    // Style not loaded: nothing reached the map.
    assert_eq!(map.0.borrow().set_filter_calls, 0);

    map.0.borrow_mut().ready = true;
    engine.on_map_ready();
    let highlight = map.filter(LAYER_SELECTED).unwrap();
    assert!(highlight.matches(&feature("DE1", 1)));
}

#[test]
fn children_filter_level_tracks_code_length_clamped() {
    for (code, expected_child_level) in [("DE", 2), ("DE1", 3), ("DE12", 3), ("DE123", 3)] {
        let (mut engine, map) = loaded_engine(vec![partition(
            code, "v0.2", "a.parquet", 1, "u1",
        )]);
        let start = Instant::now();
        engine.on_code_input(code, start);
        settle(&mut engine, start);

        let fill = map.filter(ndl_engine::LAYER_FILL).unwrap();
        let child_id = format!("{code}0");
        // A child one level down under the prefix is visible...
        assert!(
            fill.matches(&feature(&child_id, expected_child_level)),
            "child of {code} at level {expected_child_level} should be visible"
        );
        // ...a same-level feature under another prefix is not.
        assert!(!fill.matches(&feature("XX000", expected_child_level)));
    }
}

// ─── Debounce windows ───────────────────────────────────────────────

#[test]
fn rapid_keystrokes_coalesce_into_one_recomputation() {
    let (mut engine, _map) = loaded_engine(vec![partition(
        "DE1", "v0.2", "a.parquet", 1, "u1",
    )]);
    let start = Instant::now();
    engine.on_code_input("D", start);
    engine.on_code_input("DE", start + Duration::from_millis(100));
    engine.on_code_input("DE1", start + Duration::from_millis(200));

    // 300ms after the *first* keystroke nothing has fired: the window
    // restarts on every keystroke.
    engine.poll(start + Duration::from_millis(320));
    assert!(engine.selection().is_empty());

    engine.poll(start + Duration::from_millis(501));
    assert_eq!(engine.selection().code().unwrap().as_str(), "DE1");
}

#[test]
fn short_name_queries_yield_no_suggestions() {
    let (mut engine, _map) = loaded_engine(vec![partition(
        "DE1", "v0.2", "a.parquet", 1, "u1",
    )]);
    let start = Instant::now();
    engine.on_name_input("G", start);
    engine.poll(start + SUGGEST_WINDOW);
    assert!(engine.suggestions().is_empty());
}

#[test]
fn emptied_field_clears_selection() {
    let (mut engine, _map) = loaded_engine(vec![partition(
        "DE1", "v0.2", "a.parquet", 1, "u1",
    )]);
    let start = Instant::now();
    engine.on_code_input("DE1", start);
    let later = settle(&mut engine, start);
    assert!(!engine.selection().is_empty());

    engine.on_code_input("", later);
    settle(&mut engine, later);
    assert!(engine.selection().is_empty());
    assert_eq!(*engine.current_render_model(), RenderModel::Prompt);
}

// ─── Code resolution property ───────────────────────────────────────

#[test]
fn code_input_always_selects_uppercased_code() {
    for raw in ["de", " fr1 ", "AT12", "it123"] {
        let expected = raw.trim().to_uppercase();
        let (mut engine, _map) = loaded_engine(vec![partition(
            &expected, "v0.2", "a.parquet", 1, "u1",
        )]);
        let start = Instant::now();
        // Prior state must not matter.
        engine.on_map_click(&[feature("DE1", 1)]);
        engine.on_code_input(raw, start);
        settle(&mut engine, start);
        assert_eq!(engine.selection().code().unwrap().as_str(), expected);
    }
}

// ─── Prefix property on rendered rows ───────────────────────────────

#[test]
fn country_selection_matches_all_subregion_partitions() {
    let (mut engine, _map) = loaded_engine(vec![
        partition("DE1", "v0.2", "a.parquet", 1, "u1"),
        partition("de2", "v0.2", "b.parquet", 1, "u2"),
        partition("FR1", "v0.2", "c.parquet", 1, "u3"),
    ]);
    let start = Instant::now();
    engine.on_code_input("DE", start);
    settle(&mut engine, start);

    match engine.current_render_model() {
        RenderModel::Rows { rows, .. } => {
            assert_eq!(rows.len(), 2);
            for row in rows {
                assert!(row.nuts_id.to_uppercase().starts_with("DE"));
            }
        }
        other => panic!("expected rows, got {other:?}"),
    }
}
