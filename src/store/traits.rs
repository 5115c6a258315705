//! Storage backends for analysis records.
//!
//! Stores own the cached [`AnalysisRecord`]s and define lookup and upsert
//! semantics; the evaluator owns the merge rule and the sentinel policy. This
//! keeps evaluator logic independent of how records are ordered in memory
//! (unbalanced tree, balanced map).

use crate::record::AnalysisRecord;

/// Snapshot of store-level metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreMetrics {
    /// Lookups that found a record.
    pub hits: u64,
    /// Lookups that returned the absent record.
    pub misses: u64,
    /// Upserts that created a new entry.
    pub inserts: u64,
    /// Upserts that replaced an existing entry.
    pub updates: u64,
    /// Calls to `clear`.
    pub clears: u64,
}

/// Outcome of [`RecordStore::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// The key was not present; a new entry was created.
    Inserted,
    /// The key was present; its fields were overwritten.
    Updated,
}

impl Upsert {
    /// Returns `true` if the upsert created a new entry.
    #[inline]
    pub fn is_insert(self) -> bool {
        matches!(self, Upsert::Inserted)
    }
}

/// Ordered, merge-on-write store of analysis records keyed by integer.
///
/// At most one record per key is stored. Lookups return copies, so callers
/// cannot mutate store state except through [`upsert`](RecordStore::upsert).
pub trait RecordStore {
    /// Insert `record`, or overwrite every field of the existing record with
    /// the same key.
    fn upsert(&mut self, record: AnalysisRecord) -> Upsert;

    /// Return a copy of the record for `key`, or
    /// [`AnalysisRecord::absent`] if none is stored.
    fn lookup(&self, key: i32) -> AnalysisRecord;

    /// Check if a record for `key` is stored.
    fn contains(&self, key: i32) -> bool;

    /// Number of distinct keys stored.
    fn len(&self) -> usize;

    /// Check if the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release every record. Safe to call on an empty store.
    fn clear(&mut self);

    /// Snapshot the store's current metrics.
    fn metrics(&self) -> StoreMetrics {
        StoreMetrics::default()
    }
}
