//! Memoizing property evaluator.
//!
//! [`PropertyEvaluator`] is the entry point callers use. Every query first
//! looks the integer up in the evaluator's own record store; only a miss of
//! the specific property triggers computation, after which the result is
//! merged into the looked-up record and written back.
//!
//! ## Query Flow
//!
//! ```text
//!   is_even(n)
//!     1. record = store.lookup(n)          (copy, or absent record)
//!     2. evenness evaluated? ── yes ──► return cached value
//!     3. record.key = n
//!        record.evenness = n % 2 == 0      (divisibility left untouched)
//!     4. n != i32::MIN ? store.upsert(record) : skip
//!     5. return evenness
//! ```
//!
//! `is_divisible_by_2_to_9` follows the same flow for the divisibility field.
//! `evaluation_type` only reads.
//!
//! ## Sentinel Key
//!
//! A store miss is reported with key `i32::MIN`, so results for `i32::MIN`
//! itself are never written back: they are recomputed on each query and
//! `evaluation_type(i32::MIN)` always reports `NEVER_EVALUATED`. Queries for
//! `i32::MIN` do not consult the store, so a record filed under that key in a
//! store passed to [`PropertyEvaluator::with_store`] is ignored.
//!
//! ## Example Usage
//!
//! ```
//! use intmemo::evaluation::EvaluationType;
//! use intmemo::evaluator::PropertyEvaluator;
//!
//! let mut evaluator = PropertyEvaluator::new();
//!
//! assert!(evaluator.is_even(52));
//! assert_eq!(evaluator.evaluation_type(52), EvaluationType::EVEN_ODD);
//!
//! assert!(!evaluator.is_divisible_by_2_to_9(52));
//! assert_eq!(evaluator.evaluation_type(52), EvaluationType::BOTH);
//!
//! assert_eq!(evaluator.evaluation_type(51), EvaluationType::NEVER_EVALUATED);
//! ```
//!
//! ## Thread Safety
//!
//! - [`PropertyEvaluator`]: single-threaded; queries that may write take
//!   `&mut self`.
//! - `ConcurrentEvaluator` (feature `concurrency`): one mutex around each
//!   query.

#[cfg(feature = "concurrency")]
use parking_lot::Mutex;

use crate::evaluation::EvaluationType;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::EvaluatorMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::EvaluatorMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    EvaluatorMetricsReadRecorder, EvaluatorMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
use crate::property;
use crate::record::{AnalysisRecord, SENTINEL_KEY, Tristate};
use crate::store::traits::{RecordStore, StoreMetrics, Upsert};
use crate::store::tree::TreeStore;

/// Facade answering property queries through a memoizing record store.
///
/// The store is owned by the evaluator; separate evaluators never share
/// cached state.
#[derive(Debug)]
pub struct PropertyEvaluator<S = TreeStore> {
    store: S,
    #[cfg(feature = "metrics")]
    metrics: EvaluatorMetrics,
}

impl PropertyEvaluator<TreeStore> {
    /// Creates an evaluator over an empty [`TreeStore`].
    pub fn new() -> Self {
        Self::with_store(TreeStore::new())
    }
}

impl Default for PropertyEvaluator<TreeStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> PropertyEvaluator<S>
where
    S: RecordStore,
{
    /// Creates an evaluator over `store`.
    ///
    /// Records already in `store` are treated as cached results.
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            #[cfg(feature = "metrics")]
            metrics: EvaluatorMetrics::default(),
        }
    }

    /// Returns `true` if `n` is even.
    ///
    /// Zero is even; negative integers are classified by the same rule.
    pub fn is_even(&mut self, n: i32) -> bool {
        let mut record = self.cached(n);
        if let Some(even) = record.evenness.value() {
            #[cfg(feature = "metrics")]
            self.metrics.record_is_even_hit();
            tracing::trace!(n, even, "evenness cache hit");
            return even;
        }

        let even = property::is_even(n);
        record.key = n;
        record.evenness = Tristate::from(even);
        #[cfg(feature = "metrics")]
        self.metrics.record_is_even_computed();
        tracing::trace!(n, even, "evenness computed");

        self.write_back(record);
        even
    }

    /// Returns `true` if `n` is divisible by every integer from 2 through 9.
    ///
    /// Divisors are tested in ascending order and the scan stops at the first
    /// one that fails; see [`property::first_failing_divisor`].
    pub fn is_divisible_by_2_to_9(&mut self, n: i32) -> bool {
        let mut record = self.cached(n);
        if let Some(divisible) = record.divisibility.value() {
            #[cfg(feature = "metrics")]
            self.metrics.record_divisibility_hit();
            tracing::trace!(n, divisible, "divisibility cache hit");
            return divisible;
        }

        let failing = property::first_failing_divisor(n);
        let divisible = failing.is_none();
        record.key = n;
        record.divisibility = Tristate::from(divisible);
        #[cfg(feature = "metrics")]
        self.metrics.record_divisibility_computed();
        tracing::trace!(n, divisible, ?failing, "divisibility computed");

        self.write_back(record);
        divisible
    }

    /// Reports which properties of `n` have been evaluated.
    ///
    /// Returns `NEVER_EVALUATED` when no record for `n` is cached, otherwise
    /// the union of `EVEN_ODD` and `DIVISIBILITY` for the evaluated fields.
    pub fn evaluation_type(&self, n: i32) -> EvaluationType {
        let ty = EvaluationType::of(&self.cached(n));
        #[cfg(feature = "metrics")]
        {
            (&self.metrics).record_evaluation_type_call();
            if ty == EvaluationType::NEVER_EVALUATED {
                (&self.metrics).record_never_evaluated();
            }
        }
        ty
    }

    /// Returns a copy of the cached record for `n`, or the absent record.
    pub fn record(&self, n: i32) -> AnalysisRecord {
        self.cached(n)
    }

    /// Number of distinct integers with a cached record.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Drops every cached record.
    pub fn reset(&mut self) {
        let released = self.store.len();
        self.store.clear();
        #[cfg(feature = "metrics")]
        self.metrics.record_reset();
        tracing::debug!(released, "evaluator cache reset");
    }

    /// Read access to the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the evaluator and returns its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Snapshot of the backing store's counters.
    pub fn store_metrics(&self) -> StoreMetrics {
        self.store.metrics()
    }

    fn cached(&self, n: i32) -> AnalysisRecord {
        if n == SENTINEL_KEY {
            return AnalysisRecord::absent();
        }
        self.store.lookup(n)
    }

    fn write_back(&mut self, record: AnalysisRecord) {
        if record.is_absent() {
            #[cfg(feature = "metrics")]
            self.metrics.record_sentinel_skip();
            tracing::trace!(key = record.key, "sentinel key not cached");
            return;
        }

        match self.store.upsert(record) {
            Upsert::Inserted => {
                #[cfg(feature = "metrics")]
                self.metrics.record_cache_insert();
            },
            Upsert::Updated => {
                #[cfg(feature = "metrics")]
                self.metrics.record_cache_update();
            },
        }
    }
}

#[cfg(feature = "metrics")]
impl<S> PropertyEvaluator<S>
where
    S: RecordStore,
{
    pub fn metrics_snapshot(&self) -> EvaluatorMetricsSnapshot {
        self.metrics.snapshot(self.store.len())
    }
}

#[cfg(feature = "metrics")]
impl<S> MetricsSnapshotProvider<EvaluatorMetricsSnapshot> for PropertyEvaluator<S>
where
    S: RecordStore,
{
    fn snapshot(&self) -> EvaluatorMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<S> MetricsReset for PropertyEvaluator<S> {
    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

/// Thread-safe evaluator: a [`PropertyEvaluator`] behind a single mutex.
///
/// The lock is held for the whole lookup, compute and write-back sequence, so
/// each property is computed at most once per key even under contention.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "concurrency")]
/// # {
/// use std::sync::Arc;
/// use std::thread;
///
/// use intmemo::evaluator::ConcurrentEvaluator;
///
/// let evaluator = Arc::new(ConcurrentEvaluator::new());
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let evaluator = Arc::clone(&evaluator);
///         thread::spawn(move || evaluator.is_even(52))
///     })
///     .collect();
/// for handle in handles {
///     assert!(handle.join().unwrap());
/// }
/// assert_eq!(evaluator.len(), 1);
/// # }
/// ```
#[cfg(feature = "concurrency")]
#[derive(Debug)]
pub struct ConcurrentEvaluator<S = TreeStore> {
    inner: Mutex<PropertyEvaluator<S>>,
}

#[cfg(feature = "concurrency")]
impl ConcurrentEvaluator<TreeStore> {
    pub fn new() -> Self {
        Self::from_evaluator(PropertyEvaluator::new())
    }
}

#[cfg(feature = "concurrency")]
impl Default for ConcurrentEvaluator<TreeStore> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "concurrency")]
impl<S> ConcurrentEvaluator<S>
where
    S: RecordStore,
{
    pub fn with_store(store: S) -> Self {
        Self::from_evaluator(PropertyEvaluator::with_store(store))
    }

    pub fn from_evaluator(evaluator: PropertyEvaluator<S>) -> Self {
        Self {
            inner: Mutex::new(evaluator),
        }
    }

    pub fn is_even(&self, n: i32) -> bool {
        self.inner.lock().is_even(n)
    }

    pub fn is_divisible_by_2_to_9(&self, n: i32) -> bool {
        self.inner.lock().is_divisible_by_2_to_9(n)
    }

    pub fn evaluation_type(&self, n: i32) -> EvaluationType {
        self.inner.lock().evaluation_type(n)
    }

    pub fn record(&self, n: i32) -> AnalysisRecord {
        self.inner.lock().record(n)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    /// Runs `f` with exclusive access to the wrapped evaluator.
    pub fn with_evaluator<R>(&self, f: impl FnOnce(&mut PropertyEvaluator<S>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn into_inner(self) -> PropertyEvaluator<S> {
        self.inner.into_inner()
    }
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl<S> MetricsSnapshotProvider<EvaluatorMetricsSnapshot> for ConcurrentEvaluator<S>
where
    S: RecordStore,
{
    fn snapshot(&self) -> EvaluatorMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }
}
