//! Flags describing which properties of an integer have been evaluated.
//!
//! | Value             | Bits    | Meaning                                   |
//! |-------------------|---------|-------------------------------------------|
//! | `NONE`            | `0b000` | Cached, but no property computed          |
//! | `EVEN_ODD`        | `0b001` | Evenness computed                         |
//! | `DIVISIBILITY`    | `0b010` | Divisibility by 2..=9 computed            |
//! | `BOTH`            | `0b011` | Union of `EVEN_ODD` and `DIVISIBILITY`    |
//! | `NEVER_EVALUATED` | `0b100` | No cached record for the integer          |
//!
//! ```
//! use intmemo::evaluation::EvaluationType;
//!
//! let ty = EvaluationType::EVEN_ODD | EvaluationType::DIVISIBILITY;
//! assert_eq!(ty, EvaluationType::BOTH);
//! assert!(ty.contains(EvaluationType::EVEN_ODD));
//! assert_eq!(ty.to_string(), "BothEvaluated");
//! ```

use std::fmt;

use bitflags::bitflags;

use crate::record::AnalysisRecord;

bitflags! {
    /// Evaluation state of an integer as reported by
    /// [`PropertyEvaluator::evaluation_type`](crate::evaluator::PropertyEvaluator::evaluation_type).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EvaluationType: u8 {
        /// Evenness has been computed.
        const EVEN_ODD = 0b001;
        /// Divisibility by 2 through 9 has been computed.
        const DIVISIBILITY = 0b010;
        /// Both properties have been computed.
        const BOTH = Self::EVEN_ODD.bits() | Self::DIVISIBILITY.bits();
        /// The integer has no cached record.
        const NEVER_EVALUATED = 0b100;
    }
}

impl EvaluationType {
    /// No property evaluated.
    pub const NONE: Self = Self::empty();

    /// Derives the evaluation type of a looked-up record.
    ///
    /// Records carrying the sentinel key map to `NEVER_EVALUATED`.
    pub fn of(record: &AnalysisRecord) -> Self {
        if record.is_absent() {
            return Self::NEVER_EVALUATED;
        }

        let mut ty = Self::NONE;
        if record.evenness.is_evaluated() {
            ty |= Self::EVEN_ODD;
        }
        if record.divisibility.is_evaluated() {
            ty |= Self::DIVISIBILITY;
        }
        ty
    }

    /// Returns `true` if a record for the integer exists in the cache.
    #[inline]
    pub fn is_cached(self) -> bool {
        !self.contains(Self::NEVER_EVALUATED)
    }
}

impl fmt::Display for EvaluationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if *self == Self::NONE {
            "None"
        } else if *self == Self::EVEN_ODD {
            "EvenOddEvaluated"
        } else if *self == Self::DIVISIBILITY {
            "DivisibilityEvaluated"
        } else if *self == Self::BOTH {
            "BothEvaluated"
        } else if *self == Self::NEVER_EVALUATED {
            "NeverEvaluated"
        } else {
            return write!(f, "EvaluationType({:#05b})", self.bits());
        };
        f.write_str(name)
    }
}
