use std::cell::Cell;

/// Counter that can be bumped through `&self`.
///
/// Used for read paths (`peek_lru`, `recency_rank`, cursor movement) that do
/// not hold `&mut` on the cache. `Cell` keeps the owning cache `!Sync`, which
/// matches its single-owner contract.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }

    #[inline]
    pub fn add(&self, n: u64) {
        self.0.set(self.0.get() + n);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.set(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incr_add_reset() {
        let cell = MetricsCell::new();
        cell.incr();
        cell.add(4);
        assert_eq!(cell.get(), 5);
        cell.reset();
        assert_eq!(cell.get(), 0);
    }
}
