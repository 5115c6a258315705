//! Per-integer analysis records.
//!
//! An [`AnalysisRecord`] holds everything known about one integer: its key and
//! one [`Tristate`] per property. Records are small `Copy` values; stores hand
//! out copies, never references into their own storage.
//!
//! ## Sentinel key
//!
//! A lookup that finds nothing returns [`AnalysisRecord::absent`], whose key is
//! [`SENTINEL_KEY`] (`i32::MIN`). The sentinel is indistinguishable from a real
//! record for `i32::MIN`, so that one integer is never cached: its properties
//! are recomputed on every query.
//!
//! ```
//! use intmemo::record::{AnalysisRecord, Tristate, SENTINEL_KEY};
//!
//! let absent = AnalysisRecord::absent();
//! assert_eq!(absent.key, SENTINEL_KEY);
//! assert!(absent.is_absent());
//!
//! let mut record = AnalysisRecord::new(52);
//! record.evenness = Tristate::True;
//! assert!(record.evenness.is_evaluated());
//! assert!(!record.divisibility.is_evaluated());
//! ```

use std::fmt;

/// Key reported by a lookup miss.
pub const SENTINEL_KEY: i32 = i32::MIN;

/// Evaluation state of a single property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tristate {
    /// The property has not been computed for this key.
    #[default]
    Unevaluated,
    /// Computed; the property does not hold.
    False,
    /// Computed; the property holds.
    True,
}

impl Tristate {
    /// Returns `true` once the property has been computed.
    #[inline]
    pub fn is_evaluated(self) -> bool {
        !matches!(self, Tristate::Unevaluated)
    }

    /// Returns the computed value, or `None` while unevaluated.
    #[inline]
    pub fn value(self) -> Option<bool> {
        match self {
            Tristate::Unevaluated => None,
            Tristate::False => Some(false),
            Tristate::True => Some(true),
        }
    }
}

impl From<bool> for Tristate {
    #[inline]
    fn from(value: bool) -> Self {
        if value { Tristate::True } else { Tristate::False }
    }
}

impl fmt::Display for Tristate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tristate::Unevaluated => "unevaluated",
            Tristate::False => "false",
            Tristate::True => "true",
        })
    }
}

/// Cached analysis state for one integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnalysisRecord {
    /// The integer analyzed. Identity and sort key.
    pub key: i32,
    /// Even (`True`) or odd (`False`).
    pub evenness: Tristate,
    /// Divisible by every integer in 2..=9.
    pub divisibility: Tristate,
}

impl AnalysisRecord {
    /// Creates a record for `key` with every property unevaluated.
    #[inline]
    pub fn new(key: i32) -> Self {
        Self {
            key,
            evenness: Tristate::Unevaluated,
            divisibility: Tristate::Unevaluated,
        }
    }

    /// The record returned by a lookup that found nothing.
    #[inline]
    pub fn absent() -> Self {
        Self::new(SENTINEL_KEY)
    }

    /// Returns `true` if this record carries the sentinel key.
    #[inline]
    pub fn is_absent(&self) -> bool {
        self.key == SENTINEL_KEY
    }

    /// Returns `true` if at least one property has been computed.
    #[inline]
    pub fn is_partially_evaluated(&self) -> bool {
        self.evenness.is_evaluated() || self.divisibility.is_evaluated()
    }

    /// Returns `true` if every property has been computed.
    #[inline]
    pub fn is_fully_evaluated(&self) -> bool {
        self.evenness.is_evaluated() && self.divisibility.is_evaluated()
    }
}

impl Default for AnalysisRecord {
    fn default() -> Self {
        Self::absent()
    }
}
