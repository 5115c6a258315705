//! intmemo: memoizing integer-property evaluator over an ordered record cache.
//!
//! [`PropertyEvaluator`](evaluator::PropertyEvaluator) answers "is it even?",
//! "is it divisible by each of 2..9?" and "what has been evaluated?", caching
//! per-integer [`AnalysisRecord`](record::AnalysisRecord)s in a
//! [`RecordStore`](store::traits::RecordStore) so repeated queries skip
//! recomputation.

pub mod builder;
pub mod error;
pub mod evaluation;
pub mod evaluator;
pub mod property;
pub mod record;
pub mod store;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
