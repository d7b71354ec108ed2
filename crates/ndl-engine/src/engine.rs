//! # Engine Facade
//!
//! Wires the resolver, selection state, partition query, map sync, and
//! debounce timers into the single object the surrounding UI talks to.
//!
//! ## Event Model
//!
//! The host forwards its input callbacks:
//!
//! - [`Engine::on_code_input`] / [`Engine::on_name_input`] — keystrokes.
//!   These only record the raw text and arm the debounce timers; the
//!   selection transition happens when the refresh window elapses.
//! - [`Engine::on_map_click`] — applies immediately, bypassing debounce.
//! - [`Engine::on_catalog_loaded`] / [`Engine::on_partitions_loaded`] —
//!   load completions, also immediate. A failed load is reported as the
//!   empty catalog/listing (degrade, not hang).
//! - [`Engine::poll`] — the host's timer tick; fires due debounce windows.
//!
//! Each selection transition re-derives the render model and the map
//! filter to completion before the entry point returns, so the two views
//! are never observably out of sync with each other.

use std::fmt;
use std::time::Instant;

use ndl_core::partition::PartitionRecord;
use ndl_core::RegionCatalog;

use crate::debounce::{Debouncer, REFRESH_WINDOW, SUGGEST_WINDOW};
use crate::mapsync::{derive_filters, push_filters, MapBackend, MapFilterSet};
use crate::matcher::{FuzzyMatcher, MatchCandidate, DEFAULT_SHORTLIST};
use crate::query::{render, RenderModel};
use crate::resolver::{
    resolve_code, resolve_map_click, resolve_name, ActiveMode, MapFeature, Resolution,
};
use crate::selection::SelectionState;

/// The region resolution and view-synchronization engine.
pub struct Engine {
    api_base: String,

    catalog: RegionCatalog,
    partitions: Vec<PartitionRecord>,
    catalog_loaded: bool,
    partitions_loaded: bool,

    selection: SelectionState,
    mode: Option<ActiveMode>,
    code_field: String,
    name_field: String,

    map: Option<Box<dyn MapBackend>>,
    map_synced: bool,

    render_model: RenderModel,
    filters: MapFilterSet,
    suggestions: Vec<MatchCandidate>,

    suggest_timer: Debouncer,
    refresh_timer: Debouncer,
}

impl Engine {
    /// Create an engine for a session. `api_base` is the prefix bundle
    /// URLs are assembled under.
    pub fn new(api_base: impl Into<String>) -> Self {
        let selection = SelectionState::default();
        let filters = derive_filters(&selection);
        Self {
            api_base: api_base.into(),
            catalog: RegionCatalog::default(),
            partitions: Vec::new(),
            catalog_loaded: false,
            partitions_loaded: false,
            selection,
            mode: None,
            code_field: String::new(),
            name_field: String::new(),
            map: None,
            map_synced: false,
            render_model: RenderModel::Loading,
            filters,
            suggestions: Vec::new(),
            suggest_timer: Debouncer::new(SUGGEST_WINDOW),
            refresh_timer: Debouncer::new(REFRESH_WINDOW),
        }
    }

    // ─── Bootstrap ──────────────────────────────────────────────────

    /// Inject the map capability. Without one, map-dependent behavior is
    /// inert and everything else works.
    pub fn set_map_backend(&mut self, backend: Box<dyn MapBackend>) {
        self.map = Some(backend);
        self.push_map_filters();
    }

    /// The map's style-ready signal. The map may become ready after the
    /// first state is already set, so the current filters are (re)pushed
    /// here.
    pub fn on_map_ready(&mut self) {
        self.push_map_filters();
    }

    /// Name-catalog load completed. Pass `RegionCatalog::default()` for a
    /// failed or malformed load.
    pub fn on_catalog_loaded(&mut self, catalog: RegionCatalog) {
        if catalog.is_empty() {
            tracing::warn!("region name catalog is empty; proceeding degraded");
        }
        self.catalog = catalog;
        self.catalog_loaded = true;
        self.on_listing_progress();
    }

    /// Partition-listing load completed. Pass an empty vector for a
    /// failed or malformed load.
    pub fn on_partitions_loaded(&mut self, partitions: Vec<PartitionRecord>) {
        if partitions.is_empty() {
            tracing::warn!("partition listing is empty; proceeding degraded");
        }
        self.partitions = partitions;
        self.partitions_loaded = true;
        self.on_listing_progress();
    }

    /// Whether both listings have completed loading (success or failure).
    pub fn listings_ready(&self) -> bool {
        self.catalog_loaded && self.partitions_loaded
    }

    fn on_listing_progress(&mut self) {
        if self.listings_ready() {
            // Load completions bypass debouncing: re-resolve whatever the
            // user has typed in the meantime.
            self.refresh_timer.cancel();
            self.resolve_and_sync();
            self.refresh_suggestions();
        }
    }

    // ─── Resolution entry points ────────────────────────────────────

    /// A keystroke in the code field. Takes ownership of the input mode
    /// and clears the name field's raw text; the selection itself only
    /// changes when the refresh window elapses.
    pub fn on_code_input(&mut self, text: &str, now: Instant) {
        metrics::counter!("ndl_input_events_total", "source" => "code").increment(1);
        self.code_field = text.to_string();
        self.name_field.clear();
        self.mode = Some(ActiveMode::Code);
        self.suggestions.clear();
        self.suggest_timer.cancel();
        self.refresh_timer.arm(now);
    }

    /// A keystroke in the name field. Takes ownership of the input mode
    /// and clears the code field's raw text.
    pub fn on_name_input(&mut self, text: &str, now: Instant) {
        metrics::counter!("ndl_input_events_total", "source" => "name").increment(1);
        self.name_field = text.to_string();
        self.code_field.clear();
        self.mode = Some(ActiveMode::Name);
        self.suggest_timer.arm(now);
        self.refresh_timer.arm(now);
    }

    /// A map click, with the catalog features intersecting the click
    /// point. Applies immediately; any pending keystroke recomputation is
    /// superseded.
    pub fn on_map_click(&mut self, features: &[MapFeature]) {
        metrics::counter!("ndl_input_events_total", "source" => "map").increment(1);
        self.suggest_timer.cancel();
        self.refresh_timer.cancel();
        self.suggestions.clear();

        match resolve_map_click(features) {
            Resolution::Resolved(code) => {
                self.code_field = code.to_string();
                self.name_field.clear();
                self.mode = Some(ActiveMode::Code);
            }
            Resolution::Unresolved => {
                self.code_field.clear();
                self.name_field.clear();
                self.mode = None;
            }
        }
        self.resolve_and_sync();
    }

    /// The host's timer tick. Fires any due debounce window.
    pub fn poll(&mut self, now: Instant) {
        if self.suggest_timer.fire_due(now) {
            self.refresh_suggestions();
        }
        if self.refresh_timer.fire_due(now) {
            self.resolve_and_sync();
        }
    }

    // ─── Derived views ──────────────────────────────────────────────

    /// The up-to-date table/prompt/error state for display.
    pub fn current_render_model(&self) -> &RenderModel {
        &self.render_model
    }

    /// The up-to-date per-layer map predicate set.
    pub fn current_map_filter(&self) -> &MapFilterSet {
        &self.filters
    }

    /// The current fuzzy suggestions for the name field.
    pub fn suggestions(&self) -> &[MatchCandidate] {
        &self.suggestions
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Which field owns the input, if any.
    pub fn active_mode(&self) -> Option<ActiveMode> {
        self.mode
    }

    /// The code field's raw text, as the UI must display it (the engine
    /// clears it when the name field takes over, and fills it on map
    /// clicks).
    pub fn code_field(&self) -> &str {
        &self.code_field
    }

    /// The name field's raw text.
    pub fn name_field(&self) -> &str {
        &self.name_field
    }

    /// Bundle-download URL, valid only while the selection yields at
    /// least one match.
    pub fn bundle_url(&self) -> Option<&str> {
        self.render_model.bundle_url()
    }

    // ─── Internals ──────────────────────────────────────────────────

    fn resolve_and_sync(&mut self) {
        let (resolution, attempted) = match self.mode {
            Some(ActiveMode::Code) => (
                resolve_code(&self.code_field),
                non_empty(&self.code_field),
            ),
            Some(ActiveMode::Name) => (
                resolve_name(&self.name_field, &self.catalog),
                non_empty(&self.name_field),
            ),
            None => (Resolution::Unresolved, None),
        };

        self.selection.apply(resolution);
        tracing::debug!(selection = %self.selection, "selection transition");

        if self.listings_ready() {
            self.render_model = render(
                &self.selection,
                attempted.as_deref(),
                &self.catalog,
                &self.partitions,
                &self.api_base,
            );
            // A failed selection is not kept highlighted: zero matches
            // cooperatively reset the selection before the map filter is
            // derived.
            if matches!(self.render_model, RenderModel::NoMatch { .. })
                && !self.selection.is_empty()
            {
                self.selection.clear();
            }
        } else {
            self.render_model = RenderModel::Loading;
        }

        self.filters = derive_filters(&self.selection);
        self.push_map_filters();
    }

    fn refresh_suggestions(&mut self) {
        self.suggestions = match self.mode {
            Some(ActiveMode::Name) => {
                FuzzyMatcher::new(&self.catalog).top_matches(&self.name_field, DEFAULT_SHORTLIST)
            }
            _ => Vec::new(),
        };
    }

    fn push_map_filters(&mut self) {
        self.map_synced = match self.map.as_mut() {
            Some(map) => push_filters(map.as_mut(), &self.filters),
            None => false,
        };
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("selection", &self.selection)
            .field("mode", &self.mode)
            .field("catalog_entries", &self.catalog.len())
            .field("partitions", &self.partitions.len())
            .field("listings_ready", &self.listings_ready())
            .field("map_synced", &self.map_synced)
            .finish_non_exhaustive()
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
