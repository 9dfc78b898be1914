//! Operation counters for [`OrderedLruCache`](crate::policy::ordered_lru::OrderedLruCache).
//!
//! Compiled only with the `metrics` feature. Recording, snapshotting and
//! exporting are split into separate traits (see [`traits`]).

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
