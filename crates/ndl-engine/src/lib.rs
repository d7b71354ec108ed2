//! # ndl-engine — Region Resolution and View Synchronization
//!
//! The engine behind the datalake download page: it turns ambiguous user
//! input — a code prefix, a free-text name, or a map click — into a single
//! canonical region selection, and keeps the three views of that selection
//! (code field, name field, map highlight) mutually consistent under
//! arbitrary interleaved edits.
//!
//! ## Architecture
//!
//! One state value fans out to everything:
//!
//! ```text
//! code input ──┐
//! name input ──┼─▶ resolver ─▶ SelectionState ─┬─▶ partition query ─▶ render model
//! map click  ──┘                               └─▶ map filter ─▶ map backend
//! ```
//!
//! Every selection transition re-derives the render model and the map
//! filter before control returns to the caller, so no observer can see one
//! updated without the other.
//!
//! ## Modules
//!
//! - `matcher` — deterministic fuzzy scoring of free text against the
//!   region name catalog.
//! - `resolver` — the three resolution entry points and the
//!   mutually-exclusive input modes.
//! - `selection` — the `Empty | Selected(code)` state value.
//! - `query` — selection → render-ready rows + bundle URL.
//! - `mapsync` — selection → per-layer map filter expressions, pushed to
//!   an injected map backend.
//! - `debounce` — single-slot cancellable timers for the two refresh
//!   classes.
//! - `engine` — the facade wiring it all together.
//!
//! ## Crate Policy
//!
//! - Single logical thread of control; no locking, no async. The host
//!   drives the engine from its event callbacks and a timer tick.
//! - Remote-data failure is a degraded state, never an error: the engine
//!   works identically with empty catalogs.
//! - The map is an injected capability. Without one, map-dependent
//!   behavior is inert and everything else works.

pub mod debounce;
pub mod engine;
pub mod mapsync;
pub mod matcher;
pub mod query;
pub mod resolver;
pub mod selection;

pub use debounce::{Debouncer, REFRESH_WINDOW, SUGGEST_WINDOW};
pub use engine::Engine;
pub use mapsync::{
    derive_filters, FilterExpr, MapBackend, MapFilterSet, LAYER_FILL, LAYER_OUTLINE,
    LAYER_SELECTED,
};
pub use matcher::{FuzzyMatcher, MatchCandidate, DEFAULT_SHORTLIST, MIN_QUERY_LEN};
pub use resolver::{ActiveMode, MapFeature, Resolution};
pub use selection::SelectionState;
pub use query::{RenderModel, RenderRow};
