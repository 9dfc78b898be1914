use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::OrderedLruMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// directly or forwarded to an OpenTelemetry collector. Write errors are
/// ignored: metrics export must never affect the cache.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", suffix, value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_metric("gauge", suffix, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<OrderedLruMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &OrderedLruMetricsSnapshot) {
        let counters = [
            ("get_calls_total", snapshot.get_calls),
            ("get_hits_total", snapshot.get_hits),
            ("get_misses_total", snapshot.get_misses),
            ("locate_calls_total", snapshot.locate_calls),
            ("locate_steps_total", snapshot.locate_steps),
            ("insert_calls_total", snapshot.insert_calls),
            ("insert_new_total", snapshot.insert_new),
            ("insert_present_total", snapshot.insert_present),
            ("insert_updates_total", snapshot.insert_updates),
            ("evict_calls_total", snapshot.evict_calls),
            ("evicted_entries_total", snapshot.evicted_entries),
            ("erase_calls_total", snapshot.erase_calls),
            ("erase_found_total", snapshot.erase_found),
            ("pop_lru_calls_total", snapshot.pop_lru_calls),
            ("pop_lru_found_total", snapshot.pop_lru_found),
            ("touch_calls_total", snapshot.touch_calls),
            ("touch_found_total", snapshot.touch_found),
            ("clear_calls_total", snapshot.clear_calls),
            ("peek_lru_calls_total", snapshot.peek_lru_calls),
            ("peek_lru_found_total", snapshot.peek_lru_found),
            ("recency_rank_calls_total", snapshot.recency_rank_calls),
            ("recency_rank_found_total", snapshot.recency_rank_found),
            (
                "recency_rank_scan_steps_total",
                snapshot.recency_rank_scan_steps,
            ),
            ("cursor_advances_total", snapshot.cursor_advances),
            ("cursor_retreats_total", snapshot.cursor_retreats),
        ];
        for (suffix, value) in counters {
            self.write_counter(suffix, value);
        }

        self.write_gauge("cache_len", snapshot.cache_len as u64);
        self.write_gauge("capacity", snapshot.capacity as u64);
        self.write_gauge("tree_height", snapshot.tree_height as u64);
    }
}
