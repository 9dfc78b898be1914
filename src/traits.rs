//! # Cache Trait Hierarchy
//!
//! Key-based cache operations shared by generic callers. The positional,
//! cursor-driven API of [`OrderedLruCache`](crate::policy::ordered_lru::OrderedLruCache)
//! (`find` / `insert` / `erase` / `begin` / `end`) is inherent; these traits
//! cover the map-like surface.
//!
//! ## Architecture
//!
//! ```text
//!                      ┌─────────────────────────────────────────┐
//!                      │            CoreCache<K, V>              │
//!                      │                                         │
//!                      │  insert(&mut, K, V) → Option<V>         │
//!                      │  get(&mut, &K) → Option<&V>             │
//!                      │  contains(&, &K) → bool                 │
//!                      │  len / is_empty / capacity / clear      │
//!                      └──────────────────┬──────────────────────┘
//!                                         │
//!               ┌─────────────────────────┴───────────────────────┐
//!               ▼                                                 ▼
//!   ┌─────────────────────────────┐                 ┌─────────────────────────────┐
//!   │    MutableCache<K, V>       │                 │    OrderedCache<K, V>       │
//!   │                             │                 │                             │
//!   │  remove(&K) → Option<V>     │                 │  first_key_value()          │
//!   │  remove_batch(&[K])         │                 │  last_key_value()           │
//!   └──────────────┬──────────────┘                 └─────────────────────────────┘
//!                  ▼
//!   ┌─────────────────────────────┐
//!   │   LruCacheTrait<K, V>       │
//!   │                             │
//!   │  pop_lru() → (K, V)         │
//!   │  peek_lru() → (&K, &V)      │
//!   │  touch(&K) → bool           │
//!   │  recency_rank(&K) → usize   │
//!   └─────────────────────────────┘
//! ```
//!
//! ## Insert semantics
//!
//! [`CoreCache::insert`] is an *upsert*: an existing key has its value
//! replaced and the previous value returned. The inherent
//! `OrderedLruCache::insert` keeps the existing value instead and reports
//! whether an insertion happened. Call the trait form explicitly when upsert
//! is wanted:
//!
//! ```
//! use lrutree::policy::ordered_lru::OrderedLruCache;
//! use lrutree::traits::CoreCache;
//!
//! let mut cache = OrderedLruCache::new(4);
//! let (_, inserted) = cache.insert(1, "a");
//! assert!(inserted);
//!
//! let (_, inserted) = cache.insert(1, "b");
//! assert!(!inserted);
//! assert_eq!(cache.peek(&1), Some(&"a"));
//!
//! assert_eq!(CoreCache::insert(&mut cache, 1, "c"), Some("a"));
//! assert_eq!(cache.peek(&1), Some(&"c"));
//! ```
//!
//! ## Thread Safety
//!
//! Implementations are single-threaded. Share them behind an exclusive lock
//! (e.g. `parking_lot::Mutex`) held for each call; even lookups reorder the
//! recency list and need `&mut`.

/// Core cache operations that all caches support.
pub trait CoreCache<K, V> {
    /// Inserts or replaces a value, returning the previous value if the key
    /// existed.
    ///
    /// If the cache is full and the key is new, the least recently used entry
    /// is evicted first.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key, marking it most recently used.
    ///
    /// # Example
    ///
    /// ```
    /// use lrutree::policy::ordered_lru::OrderedLruCache;
    /// use lrutree::traits::CoreCache;
    ///
    /// let mut cache = OrderedLruCache::new(10);
    /// CoreCache::insert(&mut cache, 1, "value");
    ///
    /// assert_eq!(cache.get(&1), Some(&"value"));
    /// assert_eq!(cache.get(&99), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating recency.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    fn capacity(&self) -> usize;

    /// Removes all entries from the cache.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use lrutree::policy::ordered_lru::OrderedLruCache;
/// use lrutree::traits::{CoreCache, MutableCache};
///
/// fn invalidate_keys<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = OrderedLruCache::new(100);
/// cache.insert(1, "one".to_string());
/// cache.insert(2, "two".to_string());
/// cache.insert(3, "three".to_string());
///
/// invalidate_keys(&mut cache, &[1, 3]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// assert!(!cache.contains(&3));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes several keys, returning the removed values in input order.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }
}

/// LRU-specific operations.
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    ///
    /// # Example
    ///
    /// ```
    /// use lrutree::policy::ordered_lru::OrderedLruCache;
    /// use lrutree::traits::LruCacheTrait;
    ///
    /// let mut cache = OrderedLruCache::new(3);
    /// cache.insert(1, "a");
    /// cache.insert(2, "b");
    /// cache.find(&1);
    ///
    /// assert_eq!(cache.pop_lru(), Some((2, "b")));
    /// ```
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without changing recency.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used; returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order (0 = most recently used).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Caches whose entries are kept in key order.
pub trait OrderedCache<K, V>: CoreCache<K, V> {
    /// Entry with the smallest key. Does not update recency.
    fn first_key_value(&self) -> Option<(&K, &V)>;

    /// Entry with the largest key. Does not update recency.
    fn last_key_value(&self) -> Option<(&K, &V)>;
}
