/// Point-in-time copy of evaluator counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorMetricsSnapshot {
    pub is_even_calls: u64,
    pub is_even_hits: u64,
    pub is_even_computed: u64,

    pub divisibility_calls: u64,
    pub divisibility_hits: u64,
    pub divisibility_computed: u64,

    pub evaluation_type_calls: u64,
    pub never_evaluated: u64,

    pub sentinel_skips: u64, // results for i32::MIN that were not cached
    pub cache_inserts: u64,
    pub cache_updates: u64,
    pub resets: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
}

impl EvaluatorMetricsSnapshot {
    /// Fraction of property queries answered from the cache.
    pub fn hit_rate(&self) -> f64 {
        let calls = self.is_even_calls + self.divisibility_calls;
        if calls == 0 {
            0.0
        } else {
            (self.is_even_hits + self.divisibility_hits) as f64 / calls as f64
        }
    }
}
