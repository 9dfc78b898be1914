use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{
    CoreMetricsRecorder, MetricsReset, OrderedLruMetricsReadRecorder, OrderedLruMetricsRecorder,
};

#[derive(Debug, Default)]
pub struct OrderedLruMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub locate_calls: u64,
    pub locate_steps: u64,
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
    pub peek_lru_calls: MetricsCell,
    pub peek_lru_found: MetricsCell,
    pub recency_rank_calls: MetricsCell,
    pub recency_rank_found: MetricsCell,
    pub recency_rank_scan_steps: MetricsCell,
    pub cursor_advances: MetricsCell,
    pub cursor_retreats: MetricsCell,
}

impl CoreMetricsRecorder for OrderedLruMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl OrderedLruMetricsRecorder for OrderedLruMetrics {
    fn record_locate_steps(&mut self, steps: usize) {
        self.locate_calls += 1;
        self.locate_steps += steps as u64;
    }

    fn record_insert_present(&mut self) {
        self.insert_present += 1;
    }

    fn record_erase_call(&mut self) {
        self.erase_calls += 1;
    }

    fn record_erase_found(&mut self) {
        self.erase_found += 1;
    }

    fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }
}

impl OrderedLruMetricsReadRecorder for OrderedLruMetrics {
    fn record_peek_lru_call(&self) {
        self.peek_lru_calls.incr();
    }

    fn record_peek_lru_found(&self) {
        self.peek_lru_found.incr();
    }

    fn record_recency_rank_call(&self) {
        self.recency_rank_calls.incr();
    }

    fn record_recency_rank_found(&self) {
        self.recency_rank_found.incr();
    }

    fn record_recency_rank_scan_step(&self) {
        self.recency_rank_scan_steps.incr();
    }

    fn record_cursor_advance(&self) {
        self.cursor_advances.incr();
    }

    fn record_cursor_retreat(&self) {
        self.cursor_retreats.incr();
    }
}

impl MetricsReset for OrderedLruMetrics {
    fn reset_metrics(&mut self) {
        *self = Self::default();
    }
}
