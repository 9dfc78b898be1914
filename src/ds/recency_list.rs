//! Intrusive recency list threaded through records of a shared [`SlotArena`].
//!
//! Unlike a standalone list, `RecencyList` does not own its nodes. Each record
//! embeds a [`ListLinks`] pair and exposes it through [`ListNode`], so the same
//! record can sit in other structures (the key index) at the same time.
//!
//! ## Architecture
//!
//! ```text
//!   head (MRU)                                             tail (LRU)
//!     │                                                       │
//!     ▼                                                       ▼
//!   ┌──────┐  older  ┌──────┐  older  ┌──────┐  older  ┌──────┐
//!   │  D   │ ──────► │  A   │ ──────► │  C   │ ──────► │  B   │
//!   │      │ ◄────── │      │ ◄────── │      │ ◄────── │      │
//!   └──────┘  newer  └──────┘  newer  └──────┘  newer  └──────┘
//! ```
//!
//! ## Operations
//! - `push_head(id)`: link a record that is not yet in the list at the head
//! - `move_to_head(id)`: unlink + push at head ("touch")
//! - `unlink(id)`: remove from the list, leaving the record in the arena
//!
//! All operations are O(1) except iteration and `validate`.

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// Recency links embedded in every record.
///
/// `newer` points toward the most-recently-used end, `older` toward the
/// least-recently-used end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListLinks {
    pub newer: Option<SlotId>,
    pub older: Option<SlotId>,
}

/// Access to the recency links of an arena record.
pub trait ListNode {
    fn list_links(&self) -> &ListLinks;
    fn list_links_mut(&mut self) -> &mut ListLinks;
}

/// Head/tail anchors of the recency list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RecencyList {
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl RecencyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently used record.
    pub fn head(&self) -> Option<SlotId> {
        self.head
    }

    /// Least recently used record (next eviction victim).
    pub fn tail(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Links `id` at the head. Both links of the record are overwritten, so
    /// a freshly inserted or recycled record needs no prior initialisation.
    pub fn push_head<N: ListNode>(&mut self, arena: &mut SlotArena<N>, id: SlotId) -> Option<()> {
        let old_head = self.head;
        *arena.get_mut(id)?.list_links_mut() = ListLinks {
            newer: None,
            older: old_head,
        };
        match old_head {
            Some(old_head) => {
                if let Some(node) = arena.get_mut(old_head) {
                    node.list_links_mut().newer = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        Some(())
    }

    /// Moves a linked record to the head; returns `false` if `id` is not live.
    pub fn move_to_head<N: ListNode>(&mut self, arena: &mut SlotArena<N>, id: SlotId) -> bool {
        if !arena.contains(id) {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.unlink(arena, id);
        self.push_head(arena, id).is_some()
    }

    /// Removes `id` from the list, repairing its neighbours and clearing its
    /// links. The record itself stays in the arena.
    pub fn unlink<N: ListNode>(&mut self, arena: &mut SlotArena<N>, id: SlotId) -> Option<()> {
        let ListLinks { newer, older } = *arena.get(id)?.list_links();

        match newer {
            Some(newer_id) => {
                if let Some(node) = arena.get_mut(newer_id) {
                    node.list_links_mut().older = older;
                }
            },
            None => self.head = older,
        }

        match older {
            Some(older_id) => {
                if let Some(node) = arena.get_mut(older_id) {
                    node.list_links_mut().newer = newer;
                }
            },
            None => self.tail = newer,
        }

        *arena.get_mut(id)?.list_links_mut() = ListLinks::default();
        Some(())
    }

    pub fn clear(&mut self) {
        self.head = None;
        self.tail = None;
    }

    /// Iterates record ids from most to least recently used.
    pub fn iter<'a, N: ListNode>(&self, arena: &'a SlotArena<N>) -> RecencyIds<'a, N> {
        RecencyIds {
            arena,
            current: self.head,
        }
    }

    /// Walks the list head to tail, checking link symmetry and termination.
    ///
    /// Returns the visited ids in MRU → LRU order.
    pub fn validate<N: ListNode>(&self, arena: &SlotArena<N>) -> Result<Vec<SlotId>, InvariantError> {
        if self.head.is_none() != self.tail.is_none() {
            return Err(InvariantError::new(
                "recency list has exactly one of head/tail set",
            ));
        }

        let mut order = Vec::with_capacity(arena.len());
        let mut expected_newer = None;
        let mut current = self.head;

        while let Some(id) = current {
            let links = arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("recency list links dead slot {id:?}")))?
                .list_links();
            if links.newer != expected_newer {
                return Err(InvariantError::new(format!(
                    "recency link mismatch at {id:?}: newer is {:?}, expected {expected_newer:?}",
                    links.newer
                )));
            }
            order.push(id);
            if order.len() > arena.len() {
                return Err(InvariantError::new("cycle detected in recency list"));
            }
            if links.older.is_none() && self.tail != Some(id) {
                return Err(InvariantError::new(format!(
                    "recency list ends at {id:?} but tail is {:?}",
                    self.tail
                )));
            }
            expected_newer = Some(id);
            current = links.older;
        }

        Ok(order)
    }
}

/// Iterator over record ids in recency order (MRU first).
pub struct RecencyIds<'a, N> {
    arena: &'a SlotArena<N>,
    current: Option<SlotId>,
}

impl<N: ListNode> Iterator for RecencyIds<'_, N> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.arena.get(id)?.list_links().older;
        Some(id)
    }
}
