//! Generational slot arena.
//!
//! Stores records in a `Vec` of slots and hands out [`SlotId`] handles made of
//! a slot index plus the slot's generation at insertion time. Removing a
//! record bumps the slot generation and pushes the index onto a free list, so
//! a later insert recycles the slot while every handle to the old record stops
//! resolving.
//!
//! ```text
//!   slots
//!   ┌───────┬────────────┬──────────────────┐
//!   │ index │ generation │ value            │
//!   ├───────┼────────────┼──────────────────┤
//!   │   0   │     0      │ Some(A)          │  ◄── SlotId { 0, gen 0 }
//!   │   1   │     1      │ None  (free)     │  ◄── SlotId { 1, gen 0 } is stale
//!   │   2   │     0      │ Some(C)          │
//!   └───────┴────────────┴──────────────────┘
//!   free_list: [1]
//! ```
//!
//! The arena never shrinks below the number of slots it has handed out; the
//! slot count is therefore the high-water mark of simultaneously live records.

/// Stable handle to a record in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: u32,
    generation: u32,
}

impl SlotId {
    /// Slot index inside the arena.
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Generation of the slot when this handle was issued.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Arena of records addressed by generational [`SlotId`]s.
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Stores `value`, recycling a free slot when one exists.
    pub fn insert(&mut self, value: T) -> SlotId {
        let index = if let Some(index) = self.free_list.pop() {
            self.slots[index as usize].value = Some(value);
            index
        } else {
            let index = u32::try_from(self.slots.len()).unwrap_or_else(|_| {
                panic!("slot arena exceeded {} slots", u32::MAX);
            });
            self.slots.push(Slot {
                generation: 0,
                value: Some(value),
            });
            index
        };
        self.len += 1;
        SlotId {
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    /// Removes the record for `id`; returns `None` if `id` is stale or vacant.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.index);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots ever handed out (live + free).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Reserved slot storage.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Drops every record and invalidates all outstanding handles.
    ///
    /// Slots are kept (with bumped generations) so that handles issued before
    /// the clear can never alias records inserted after it.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free_list.push(index as u32);
        }
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value.as_ref().map(|value| {
                (
                    SlotId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    value,
                )
            })
        })
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_arena_insert_remove_reuse() {
        let mut arena = SlotArena::new();
        let id1 = arena.insert("a");
        let id2 = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id1), Some(&"a"));
        assert_eq!(arena.get(id2), Some(&"b"));

        assert_eq!(arena.remove(id1), Some("a"));
        assert_eq!(arena.len(), 1);

        let id3 = arena.insert("c");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id3), Some(&"c"));
        assert_eq!(id1.index(), id3.index());
        assert_ne!(id1, id3);
        assert_eq!(arena.slot_count(), 2);
    }

    #[test]
    fn stale_handle_does_not_resolve_after_recycle() {
        let mut arena = SlotArena::new();
        let old = arena.insert(1u32);
        arena.remove(old);
        let new = arena.insert(2u32);

        assert_eq!(old.index(), new.index());
        assert_eq!(arena.get(old), None);
        assert!(!arena.contains(old));
        assert_eq!(arena.remove(old), None);
        assert_eq!(arena.get(new), Some(&2));
    }

    #[test]
    fn double_remove_is_rejected() {
        let mut arena = SlotArena::new();
        let id = arena.insert("x");
        assert_eq!(arena.remove(id), Some("x"));
        assert_eq!(arena.remove(id), None);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn clear_invalidates_handles_and_keeps_slots() {
        let mut arena = SlotArena::with_capacity(4);
        let a = arena.insert(10);
        let b = arena.insert(20);
        arena.clear();

        assert!(arena.is_empty());
        assert!(!arena.contains(a));
        assert!(!arena.contains(b));

        let c = arena.insert(30);
        let d = arena.insert(40);
        assert_eq!(arena.slot_count(), 2);
        assert_eq!(c.index(), 0);
        assert_eq!(d.index(), 1);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(c), Some(&30));
    }

    #[test]
    fn iter_skips_vacant_slots() {
        let mut arena = SlotArena::new();
        let a = arena.insert('a');
        let b = arena.insert('b');
        let c = arena.insert('c');
        arena.remove(b);

        let live: Vec<_> = arena.iter().collect();
        assert_eq!(live, vec![(a, &'a'), (c, &'c')]);
    }
}
