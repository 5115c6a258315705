//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are split into small traits so the
//! evaluator only writes counters, while tests and monitoring read them.
//!
//! ```text
//!   ┌─────────────────────────────┐   ┌─────────────────────────────┐
//!   │  EvaluatorMetricsRecorder   │   │ EvaluatorMetricsReadRecorder│
//!   │  (&mut self: queries that   │   │ (&self: evaluation_type)    │
//!   │   may write the cache)      │   │                             │
//!   └──────────────┬──────────────┘   └──────────────┬──────────────┘
//!                  └───────────────┬─────────────────┘
//!                                  ▼
//!                        ┌───────────────────┐
//!                        │ EvaluatorMetrics  │
//!                        └─────────┬─────────┘
//!                                  │ snapshot
//!           ┌──────────────────────┴──────────────────────┐
//!           ▼                                             ▼
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters for queries that may compute and cache a property.
pub trait EvaluatorMetricsRecorder {
    /// `is_even` answered from a cached record.
    fn record_is_even_hit(&mut self);
    /// `is_even` computed evenness.
    fn record_is_even_computed(&mut self);
    /// `is_divisible_by_2_to_9` answered from a cached record.
    fn record_divisibility_hit(&mut self);
    /// `is_divisible_by_2_to_9` computed divisibility.
    fn record_divisibility_computed(&mut self);
    /// A computed result was not cached because its key is the sentinel.
    fn record_sentinel_skip(&mut self);
    /// A computed result created a new cache entry.
    fn record_cache_insert(&mut self);
    /// A computed result was merged into an existing cache entry.
    fn record_cache_update(&mut self);
    /// The cache was reset.
    fn record_reset(&mut self);
}

/// Counters for read-only queries (uses interior mutability).
pub trait EvaluatorMetricsReadRecorder {
    fn record_evaluation_type_call(&self);
    fn record_never_evaluated(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
