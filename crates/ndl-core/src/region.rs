//! # Region Codes
//!
//! Validated newtype for NUTS region identifiers. A code is hierarchical by
//! prefix: the first two characters name a country, and each further
//! character refines the region by one level, down to the finest observed
//! level at five characters.
//!
//! ## Hierarchy Invariant
//!
//! Every code of length n has a parent of length n − 1 obtained by dropping
//! the last character. Parents are structurally valid codes even when the
//! partition catalog carries no record for them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NdlError;

/// Region levels are clamped to this maximum regardless of code length.
pub const MAX_REGION_LEVEL: u8 = 3;

/// A NUTS region identifier.
///
/// Always stored upper-cased. Construction via [`RegionCode::parse`] trims
/// surrounding whitespace and upper-cases, so user-typed input and catalog
/// keys normalize to the same representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionCode(String);

impl RegionCode {
    /// Parse and normalize a region code from raw text.
    ///
    /// Trims, upper-cases, and validates: 1 to 5 ASCII alphanumeric
    /// characters. Empty (after trimming) or malformed input is rejected.
    pub fn parse(raw: &str) -> Result<Self, NdlError> {
        let normalized = raw.trim().to_ascii_uppercase();
        if normalized.is_empty() || normalized.len() > 5 {
            return Err(NdlError::InvalidRegionCode(raw.to_string()));
        }
        if !normalized.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(NdlError::InvalidRegionCode(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters in the code.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the code is empty. Always false for a parsed code; present
    /// for clippy's `len_without_is_empty` convention.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The region level encoded by this code's length, clamped to
    /// [`MAX_REGION_LEVEL`].
    pub fn level(&self) -> u8 {
        let raw = self.0.len().saturating_sub(1) as u8;
        raw.min(MAX_REGION_LEVEL)
    }

    /// The level at which this code's children live, clamped to
    /// [`MAX_REGION_LEVEL`].
    pub fn child_level(&self) -> u8 {
        (self.level() + 1).min(MAX_REGION_LEVEL)
    }

    /// The immediate parent code, if any. A country code has no parent.
    pub fn parent(&self) -> Option<RegionCode> {
        if self.0.len() <= 2 {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_string()))
    }

    /// All proper ancestors, nearest first.
    pub fn prefix_chain(&self) -> Vec<RegionCode> {
        let mut chain = Vec::new();
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            chain.push(parent.clone());
            current = parent;
        }
        chain
    }

    /// Whether this code is a prefix of `other` (inclusive: every code is a
    /// prefix of itself). Both sides are already upper-cased, so this is a
    /// plain byte-prefix test.
    pub fn is_prefix_of(&self, other: &RegionCode) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Prefix test against a raw identifier string, case-insensitive.
    ///
    /// Partition records carry their `nuts_id` as arbitrary-case text from
    /// the remote source; this avoids allocating a `RegionCode` per record
    /// during filtering.
    pub fn matches_prefix_of_raw(&self, raw_id: &str) -> bool {
        raw_id.len() >= self.0.len()
            && raw_id
                .bytes()
                .zip(self.0.bytes())
                .all(|(a, b)| a.to_ascii_uppercase() == b)
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RegionCode {
    type Err = NdlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RegionCode {
    type Error = NdlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RegionCode> for String {
    fn from(code: RegionCode) -> Self {
        code.0
    }
}
