//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are separate responsibilities so that
//! cache logic never depends on how counters are consumed.
//!
//! ```text
//!              ┌─────────────────────────────┐
//!              │     CoreMetricsRecorder     │
//!              │  get_hit/get_miss/insert    │
//!              │  evict/clear                │
//!              └──────────────┬──────────────┘
//!                             │
//!                             ▼
//!              ┌─────────────────────────────┐      ┌─────────────────────────────┐
//!              │  OrderedLruMetricsRecorder  │      │ OrderedLruMetricsReadRecorder│
//!              │  locate steps, erase,       │      │ (&self paths: peek_lru,     │
//!              │  pop_lru, touch             │      │  recency_rank, cursors)     │
//!              └─────────────────────────────┘      └─────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters shared by every cache policy.
///
/// `get_*` counts lookups of any flavour (`find`, `get`, `get_mut`).
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Counters specific to the ordered LRU cache (`&mut self` paths).
pub trait OrderedLruMetricsRecorder: CoreMetricsRecorder {
    /// Nodes visited by one key-index walk.
    fn record_locate_steps(&mut self, steps: usize);
    /// Insert that met an existing key and left its value alone.
    fn record_insert_present(&mut self);
    fn record_erase_call(&mut self);
    fn record_erase_found(&mut self);
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Read-only counters for `&self` methods (interior mutability).
pub trait OrderedLruMetricsReadRecorder {
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
    fn record_cursor_advance(&self);
    fn record_cursor_retreat(&self);
}

/// Produce a point-in-time snapshot of metrics.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Export/publish metrics to monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
