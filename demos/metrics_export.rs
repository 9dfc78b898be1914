use lrutree::metrics::exporter::PrometheusTextExporter;
use lrutree::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
use lrutree::policy::ordered_lru::OrderedLruCache;

fn main() {
    let mut cache = OrderedLruCache::new(3);
    for key in [5u32, 2, 8, 1] {
        cache.insert(key, key * 100);
    }
    cache.find(&8);
    cache.find(&5);

    let mut pos = cache.begin();
    while !pos.is_end() {
        pos = cache.advance(pos);
    }

    let snapshot = cache.snapshot();
    println!("hit ratio: {:.2}", snapshot.hit_ratio());

    let exporter = PrometheusTextExporter::new("lrutree", std::io::stdout());
    exporter.export(&snapshot);
}

// Expected output (abridged):
// hit ratio: 0.50
// # TYPE lrutree_get_calls_total counter
// lrutree_get_calls_total 2
// ...
// lrutree_evicted_entries_total 1
// ...
// lrutree_cursor_advances_total 3
// ...
// lrutree_cache_len 3
//
// Explanation: key 5 was evicted when key 1 arrived, so find(&5) misses.
