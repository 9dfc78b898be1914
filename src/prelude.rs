pub use crate::builder::OrderedLruBuilder;
pub use crate::ds::{SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::OrderedLruMetricsSnapshot;
pub use crate::policy::ordered_lru::{Cursor, OrderedLruCache, Position};
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache, OrderedCache};
