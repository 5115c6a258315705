use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::EvaluatorMetricsSnapshot;
use crate::metrics::traits::{EvaluatorMetricsReadRecorder, EvaluatorMetricsRecorder};

#[derive(Debug, Default)]
pub struct EvaluatorMetrics {
    pub is_even_calls: u64,
    pub is_even_hits: u64,
    pub is_even_computed: u64,
    pub divisibility_calls: u64,
    pub divisibility_hits: u64,
    pub divisibility_computed: u64,
    pub sentinel_skips: u64,
    pub cache_inserts: u64,
    pub cache_updates: u64,
    pub resets: u64,
    pub evaluation_type_calls: MetricsCell,
    pub never_evaluated: MetricsCell,
}

impl EvaluatorMetrics {
    pub fn new() -> EvaluatorMetrics {
        Self::default()
    }

    /// Copies the counters, adding the cache length gauge.
    pub fn snapshot(&self, cache_len: usize) -> EvaluatorMetricsSnapshot {
        EvaluatorMetricsSnapshot {
            is_even_calls: self.is_even_calls,
            is_even_hits: self.is_even_hits,
            is_even_computed: self.is_even_computed,
            divisibility_calls: self.divisibility_calls,
            divisibility_hits: self.divisibility_hits,
            divisibility_computed: self.divisibility_computed,
            evaluation_type_calls: self.evaluation_type_calls.get(),
            never_evaluated: self.never_evaluated.get(),
            sentinel_skips: self.sentinel_skips,
            cache_inserts: self.cache_inserts,
            cache_updates: self.cache_updates,
            resets: self.resets,
            cache_len,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl EvaluatorMetricsRecorder for EvaluatorMetrics {
    fn record_is_even_hit(&mut self) {
        self.is_even_calls += 1;
        self.is_even_hits += 1;
    }

    fn record_is_even_computed(&mut self) {
        self.is_even_calls += 1;
        self.is_even_computed += 1;
    }

    fn record_divisibility_hit(&mut self) {
        self.divisibility_calls += 1;
        self.divisibility_hits += 1;
    }

    fn record_divisibility_computed(&mut self) {
        self.divisibility_calls += 1;
        self.divisibility_computed += 1;
    }

    fn record_sentinel_skip(&mut self) {
        self.sentinel_skips += 1;
    }

    fn record_cache_insert(&mut self) {
        self.cache_inserts += 1;
    }

    fn record_cache_update(&mut self) {
        self.cache_updates += 1;
    }

    fn record_reset(&mut self) {
        self.resets += 1;
    }
}

impl EvaluatorMetricsReadRecorder for &EvaluatorMetrics {
    fn record_evaluation_type_call(&self) {
        self.evaluation_type_calls.incr();
    }

    fn record_never_evaluated(&self) {
        self.never_evaluated.incr();
    }
}
