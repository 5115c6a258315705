use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::EvaluatorMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for evaluator metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// by Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", &self.metric_name(suffix), value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_metric("gauge", &self.metric_name(suffix), value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<EvaluatorMetricsSnapshot>
    for PrometheusTextExporter<W>
{
    fn export(&self, snapshot: &EvaluatorMetricsSnapshot) {
        self.write_counter("is_even_calls_total", snapshot.is_even_calls);
        self.write_counter("is_even_hits_total", snapshot.is_even_hits);
        self.write_counter("is_even_computed_total", snapshot.is_even_computed);
        self.write_counter("divisibility_calls_total", snapshot.divisibility_calls);
        self.write_counter("divisibility_hits_total", snapshot.divisibility_hits);
        self.write_counter(
            "divisibility_computed_total",
            snapshot.divisibility_computed,
        );
        self.write_counter(
            "evaluation_type_calls_total",
            snapshot.evaluation_type_calls,
        );
        self.write_counter("never_evaluated_total", snapshot.never_evaluated);
        self.write_counter("sentinel_skips_total", snapshot.sentinel_skips);
        self.write_counter("cache_inserts_total", snapshot.cache_inserts);
        self.write_counter("cache_updates_total", snapshot.cache_updates);
        self.write_counter("resets_total", snapshot.resets);
        self.write_gauge("cache_len", snapshot.cache_len as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export_to_string(prefix: &str, snapshot: &EvaluatorMetricsSnapshot) -> String {
        let exporter = PrometheusTextExporter::new(prefix, Vec::new());
        exporter.export(snapshot);
        String::from_utf8(exporter.into_inner()).unwrap()
    }

    #[test]
    fn writes_prefixed_counters_and_gauges() {
        let snapshot = EvaluatorMetricsSnapshot {
            is_even_calls: 4,
            cache_len: 2,
            ..Default::default()
        };
        let text = export_to_string("intmemo", &snapshot);

        assert!(text.contains("# TYPE intmemo_is_even_calls_total counter\n"));
        assert!(text.contains("intmemo_is_even_calls_total 4\n"));
        assert!(text.contains("# TYPE intmemo_cache_len gauge\n"));
        assert!(text.contains("intmemo_cache_len 2\n"));
    }

    #[test]
    fn empty_prefix_leaves_names_bare() {
        let text = export_to_string("", &EvaluatorMetricsSnapshot::default());
        assert!(text.contains("\nresets_total 0\n"));
        assert!(!text.contains("_resets_total"));
    }
}
