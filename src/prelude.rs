pub use crate::builder::{AnyStore, EvaluatorBuilder, StoreBackend};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::evaluation::EvaluationType;
#[cfg(feature = "concurrency")]
pub use crate::evaluator::ConcurrentEvaluator;
pub use crate::evaluator::PropertyEvaluator;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::EvaluatorMetricsSnapshot;
pub use crate::record::{AnalysisRecord, SENTINEL_KEY, Tristate};
pub use crate::store::btree::BTreeStore;
pub use crate::store::traits::{RecordStore, StoreMetrics, Upsert};
pub use crate::store::tree::TreeStore;
