//! Evaluator metrics (feature `metrics`).
//!
//! Recording, snapshotting and export are separate traits so monitoring does
//! not leak into evaluator logic. See [`traits`] for the hierarchy.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::EvaluatorMetrics;
pub use snapshot::EvaluatorMetricsSnapshot;
pub use traits::{
    EvaluatorMetricsReadRecorder, EvaluatorMetricsRecorder, MetricsExporter, MetricsReset,
    MetricsSnapshotProvider,
};
