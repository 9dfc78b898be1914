/// Point-in-time copy of [`OrderedLruMetrics`](crate::metrics::metrics_impl::OrderedLruMetrics)
/// plus gauges captured when the snapshot is taken.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OrderedLruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub locate_calls: u64,
    pub locate_steps: u64, // nodes visited across all key-index walks

    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_present: u64,
    pub insert_updates: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,

    pub erase_calls: u64,
    pub erase_found: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub clear_calls: u64,

    pub peek_lru_calls: u64,
    pub peek_lru_found: u64,
    pub recency_rank_calls: u64,
    pub recency_rank_found: u64,
    pub recency_rank_scan_steps: u64,
    pub cursor_advances: u64,
    pub cursor_retreats: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
    pub tree_height: usize,
}

impl OrderedLruMetricsSnapshot {
    /// Fraction of lookups that hit, or `0.0` before any lookup.
    pub fn hit_ratio(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }

    /// Mean number of nodes visited per key-index walk.
    pub fn mean_locate_depth(&self) -> f64 {
        if self.locate_calls == 0 {
            0.0
        } else {
            self.locate_steps as f64 / self.locate_calls as f64
        }
    }
}
