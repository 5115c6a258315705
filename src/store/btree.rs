//! Balanced record store backed by `BTreeMap`.
//!
//! Same contract as [`TreeStore`](crate::store::tree::TreeStore), including
//! the absent-record return on a miss, with O(log n) lookup and upsert
//! regardless of insertion order.
//!
//! ```rust
//! use intmemo::record::AnalysisRecord;
//! use intmemo::store::btree::BTreeStore;
//! use intmemo::store::traits::{RecordStore, Upsert};
//!
//! let mut store = BTreeStore::new();
//! assert_eq!(store.upsert(AnalysisRecord::new(3)), Upsert::Inserted);
//! assert_eq!(store.upsert(AnalysisRecord::new(3)), Upsert::Updated);
//! assert_eq!(store.len(), 1);
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::{Entry, Values};

use crate::error::InvariantError;
use crate::record::AnalysisRecord;
use crate::store::counters::StoreCounters;
use crate::store::traits::{RecordStore, StoreMetrics, Upsert};

/// Ordered-map record store.
#[derive(Debug, Default)]
pub struct BTreeStore {
    map: BTreeMap<i32, AnalysisRecord>,
    counters: StoreCounters,
}

impl BTreeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an iterator over stored records in ascending key order.
    pub fn iter(&self) -> Values<'_, i32, AnalysisRecord> {
        self.map.values()
    }

    /// Verifies every map key matches the key inside its record.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        for (key, record) in &self.map {
            if *key != record.key {
                return Err(InvariantError::new(format!(
                    "map key {} holds record for {}",
                    key, record.key
                )));
            }
        }
        Ok(())
    }

    /// Panics on a broken invariant (debug builds only).
    fn debug_validate_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            if let Err(err) = self.check_invariants() {
                panic!("btree store invariant violated: {}", err);
            }
        }
    }
}

impl RecordStore for BTreeStore {
    fn upsert(&mut self, record: AnalysisRecord) -> Upsert {
        match self.map.entry(record.key) {
            Entry::Occupied(mut entry) => {
                entry.insert(record);
                self.counters.inc_update();
                Upsert::Updated
            },
            Entry::Vacant(entry) => {
                entry.insert(record);
                self.counters.inc_insert();
                self.debug_validate_invariants();
                Upsert::Inserted
            },
        }
    }

    fn lookup(&self, key: i32) -> AnalysisRecord {
        match self.map.get(&key) {
            Some(record) => {
                self.counters.inc_hit();
                *record
            },
            None => {
                self.counters.inc_miss();
                AnalysisRecord::absent()
            },
        }
    }

    fn contains(&self, key: i32) -> bool {
        self.map.contains_key(&key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn clear(&mut self) {
        self.map.clear();
        self.counters.inc_clear();
        self.debug_validate_invariants();
    }

    fn metrics(&self) -> StoreMetrics {
        self.counters.snapshot()
    }
}
