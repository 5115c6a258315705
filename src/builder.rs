//! Evaluator builder.
//!
//! Selects the record store backend without exposing backend types in the
//! caller's signature.
//!
//! ## Example
//!
//! ```rust
//! use intmemo::builder::{EvaluatorBuilder, StoreBackend};
//! use intmemo::evaluation::EvaluationType;
//!
//! let mut evaluator = EvaluatorBuilder::new()
//!     .backend(StoreBackend::BTree)
//!     .with_capacity(128)
//!     .build();
//!
//! assert!(evaluator.is_even(52));
//! assert_eq!(evaluator.evaluation_type(52), EvaluationType::EVEN_ODD);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::evaluator::PropertyEvaluator;
use crate::record::AnalysisRecord;
use crate::store::btree::BTreeStore;
use crate::store::traits::{RecordStore, StoreMetrics, Upsert};
use crate::store::tree::TreeStore;

/// Available record store backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    /// Unbalanced binary search tree; shape follows insertion order.
    #[default]
    Tree,
    /// Balanced ordered map with O(log n) operations.
    BTree,
}

impl StoreBackend {
    pub fn name(self) -> &'static str {
        match self {
            StoreBackend::Tree => "tree",
            StoreBackend::BTree => "btree",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" | "bst" => Ok(StoreBackend::Tree),
            "btree" | "balanced" => Ok(StoreBackend::BTree),
            other => Err(ConfigError::new(format!(
                "unknown store backend `{}` (expected `tree` or `btree`)",
                other
            ))),
        }
    }
}

/// Record store chosen at runtime.
#[derive(Debug)]
pub enum AnyStore {
    Tree(TreeStore),
    BTree(BTreeStore),
}

impl AnyStore {
    /// The backend this store was built with.
    pub fn backend(&self) -> StoreBackend {
        match self {
            AnyStore::Tree(_) => StoreBackend::Tree,
            AnyStore::BTree(_) => StoreBackend::BTree,
        }
    }

    /// Iterates cached records in ascending key order.
    pub fn records(&self) -> Box<dyn Iterator<Item = &AnalysisRecord> + '_> {
        match self {
            AnyStore::Tree(tree) => Box::new(tree.iter()),
            AnyStore::BTree(btree) => Box::new(btree.iter()),
        }
    }

    pub fn check_invariants(&self) -> Result<(), crate::error::InvariantError> {
        match self {
            AnyStore::Tree(tree) => tree.check_invariants(),
            AnyStore::BTree(btree) => btree.check_invariants(),
        }
    }
}

impl RecordStore for AnyStore {
    fn upsert(&mut self, record: AnalysisRecord) -> Upsert {
        match self {
            AnyStore::Tree(tree) => tree.upsert(record),
            AnyStore::BTree(btree) => btree.upsert(record),
        }
    }

    fn lookup(&self, key: i32) -> AnalysisRecord {
        match self {
            AnyStore::Tree(tree) => tree.lookup(key),
            AnyStore::BTree(btree) => btree.lookup(key),
        }
    }

    fn contains(&self, key: i32) -> bool {
        match self {
            AnyStore::Tree(tree) => tree.contains(key),
            AnyStore::BTree(btree) => btree.contains(key),
        }
    }

    fn len(&self) -> usize {
        match self {
            AnyStore::Tree(tree) => tree.len(),
            AnyStore::BTree(btree) => btree.len(),
        }
    }

    fn clear(&mut self) {
        match self {
            AnyStore::Tree(tree) => tree.clear(),
            AnyStore::BTree(btree) => btree.clear(),
        }
    }

    fn metrics(&self) -> StoreMetrics {
        match self {
            AnyStore::Tree(tree) => tree.metrics(),
            AnyStore::BTree(btree) => btree.metrics(),
        }
    }
}

/// Builder for [`PropertyEvaluator`] over a runtime-selected backend.
#[derive(Debug, Clone, Default)]
pub struct EvaluatorBuilder {
    backend: StoreBackend,
    capacity: usize,
}

impl EvaluatorBuilder {
    /// Creates a builder using the tree backend and no preallocation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the record store backend.
    pub fn backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Preallocates space for `capacity` records.
    ///
    /// Only the tree backend preallocates. The cache never evicts, so this is
    /// not a limit.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builds the store alone.
    pub fn build_store(&self) -> AnyStore {
        match self.backend {
            StoreBackend::Tree => AnyStore::Tree(TreeStore::with_capacity(self.capacity)),
            StoreBackend::BTree => AnyStore::BTree(BTreeStore::new()),
        }
    }

    /// Builds an evaluator over a fresh, empty store.
    pub fn build(&self) -> PropertyEvaluator<AnyStore> {
        tracing::debug!(
            backend = %self.backend,
            capacity = self.capacity,
            "building property evaluator"
        );
        PropertyEvaluator::with_store(self.build_store())
    }

    /// Builds a lock-protected evaluator over a fresh, empty store.
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent(&self) -> crate::evaluator::ConcurrentEvaluator<AnyStore> {
        crate::evaluator::ConcurrentEvaluator::from_evaluator(self.build())
    }
}
