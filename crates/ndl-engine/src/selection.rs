//! # Selection State
//!
//! The single source of truth for "which region is currently selected."
//!
//! ## Single-Writer Invariant
//!
//! The state is mutated exclusively through resolver output applied by the
//! engine facade — never directly by raw keystrokes, and never from more
//! than one place. Each transition is applied to completion before either
//! downstream derivation (partition query, map sync) reads it, so the two
//! can never observe different selections.

use ndl_core::RegionCode;

use crate::resolver::Resolution;

/// The current region selection. There is no terminal state; the value is
/// reset freely for the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Nothing selected.
    #[default]
    Empty,
    /// A region is selected.
    Selected(RegionCode),
}

impl SelectionState {
    /// Apply a resolution outcome: a resolved code selects it, an
    /// unresolved input clears the selection.
    pub fn apply(&mut self, resolution: Resolution) {
        *self = match resolution {
            Resolution::Resolved(code) => Self::Selected(code),
            Resolution::Unresolved => Self::Empty,
        };
    }

    /// Explicitly clear the selection (failed query, emptied field).
    pub fn clear(&mut self) {
        *self = Self::Empty;
    }

    /// The selected code, if any.
    pub fn code(&self) -> Option<&RegionCode> {
        match self {
            Self::Selected(code) => Some(code),
            Self::Empty => None,
        }
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl std::fmt::Display for SelectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("EMPTY"),
            Self::Selected(code) => write!(f, "SELECTED({code})"),
        }
    }
}
