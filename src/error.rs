//! Error types for lrutree.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned by fallible constructors when the configuration
//!   is unusable (a capacity of zero).
//! - [`InvariantError`]: Returned by [`OrderedLruCache::check_invariants`]
//!   when the key index, the recency list, or the size accounting disagree.
//!
//! Misusing a [`Position`](crate::policy::ordered_lru::Position) (erasing or
//! dereferencing the end position, or a position whose entry was erased or
//! evicted) is a precondition violation and panics instead of returning an
//! error; the `try_*` / `get_at` variants report those cases as `None`.
//!
//! ## Example Usage
//!
//! ```
//! use lrutree::error::ConfigError;
//! use lrutree::policy::ordered_lru::OrderedLruCache;
//!
//! let cache: Result<OrderedLruCache<u32, &str>, ConfigError> = OrderedLruCache::try_new(8);
//! assert!(cache.is_ok());
//!
//! let bad = OrderedLruCache::<u32, &str>::try_new(0);
//! assert!(bad.is_err());
//! ```
//!
//! [`OrderedLruCache::check_invariants`]: crate::policy::ordered_lru::OrderedLruCache::check_invariants

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when the cache's internal structure is inconsistent.
///
/// Carries a human-readable description of the first invariant that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`OrderedLruCache::try_new`](crate::policy::ordered_lru::OrderedLruCache::try_new)
/// and [`OrderedLruBuilder::try_build`](crate::builder::OrderedLruBuilder::try_build).
///
/// # Example
///
/// ```
/// use lrutree::policy::ordered_lru::OrderedLruCache;
///
/// let err = OrderedLruCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }

    pub(crate) fn zero_capacity() -> Self {
        Self::new("capacity must be greater than zero")
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
