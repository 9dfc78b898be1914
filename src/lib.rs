//! lrutree: a fixed-capacity LRU cache with ordered, cursor-based traversal.
//!
//! Entries live in one slot arena and are threaded through two structures at
//! once: a binary search tree keyed by `K` and a recency list. Lookups and
//! inserts mark entries most recently used; when full, an insert evicts the
//! least recently used entry. Independently of recency, the cache can be
//! walked in ascending key order with copyable [`Position`] handles.
//!
//! ```
//! use lrutree::prelude::*;
//!
//! let mut cache = OrderedLruCache::new(3);
//! for key in [30, 10, 20] {
//!     cache.insert(key, key.to_string());
//! }
//! cache.insert(40, "40".to_string()); // evicts 30
//!
//! let mut pos = cache.begin();
//! let mut keys = Vec::new();
//! while pos != cache.end() {
//!     keys.push(*cache.at(pos).0);
//!     pos = cache.advance(pos);
//! }
//! assert_eq!(keys, [10, 20, 40]);
//! ```
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

pub use crate::policy::ordered_lru::{OrderedLruCache, Position};
