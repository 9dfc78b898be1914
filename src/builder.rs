//! Builder for [`OrderedLruCache`] instances.
//!
//! ## Example
//!
//! ```rust
//! use lrutree::builder::OrderedLruBuilder;
//!
//! let mut cache = OrderedLruBuilder::new(100)
//!     .preallocate(true)
//!     .build::<u64, String>();
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.peek(&1), Some(&"hello".to_string()));
//! ```

use crate::error::ConfigError;
use crate::policy::ordered_lru::OrderedLruCache;

/// Builder for creating ordered LRU caches.
#[derive(Debug, Clone, Copy)]
pub struct OrderedLruBuilder {
    capacity: usize,
    preallocate: bool,
}

impl OrderedLruBuilder {
    /// Create a new builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            preallocate: false,
        }
    }

    /// Reserve storage for every entry up front instead of growing on demand.
    pub fn preallocate(mut self, preallocate: bool) -> Self {
        self.preallocate = preallocate;
        self
    }

    /// Build the cache.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero.
    pub fn build<K: Ord, V>(self) -> OrderedLruCache<K, V> {
        self.try_build().unwrap_or_else(|err| panic!("{err}"))
    }

    /// Build the cache, rejecting a zero capacity.
    ///
    /// ```rust
    /// use lrutree::builder::OrderedLruBuilder;
    ///
    /// assert!(OrderedLruBuilder::new(0).try_build::<u8, u8>().is_err());
    /// ```
    pub fn try_build<K: Ord, V>(self) -> Result<OrderedLruCache<K, V>, ConfigError> {
        OrderedLruCache::with_options(self.capacity, self.preallocate)
    }
}
