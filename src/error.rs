//! Error types for the intmemo library.
//!
//! Queries on [`PropertyEvaluator`](crate::evaluator::PropertyEvaluator) are
//! total and never fail. The errors here belong to the surrounding surface:
//!
//! - [`InvariantError`]: returned by `check_invariants` on record stores when
//!   the ordering or uniqueness of cached records is broken.
//! - [`ConfigError`]: returned when evaluator configuration cannot be parsed
//!   (e.g. an unknown store backend name).
//!
//! ## Example Usage
//!
//! ```
//! use intmemo::builder::StoreBackend;
//! use intmemo::error::ConfigError;
//!
//! let backend: Result<StoreBackend, ConfigError> = "btree".parse();
//! assert!(backend.is_ok());
//!
//! let bad = "skiplist".parse::<StoreBackend>();
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when a record store's structural invariants are violated.
///
/// Produced by [`TreeStore::check_invariants`](crate::store::tree::TreeStore::check_invariants)
/// and [`BTreeStore::check_invariants`](crate::store::btree::BTreeStore::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when evaluator configuration is invalid.
///
/// # Example
///
/// ```
/// use intmemo::builder::StoreBackend;
///
/// let err = "hashmap".parse::<StoreBackend>().unwrap_err();
/// assert!(err.to_string().contains("hashmap"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
