//! Unbalanced binary search tree threaded through records of a shared
//! [`SlotArena`].
//!
//! Every record embeds a [`TreeLinks`] triple (`parent`, `left`, `right`) and
//! exposes its key through [`TreeNode`]. The tree owns nothing: the arena owns
//! the records and the links are plain [`SlotId`] handles. `TreeIndex` itself
//! only stores the root slot.
//!
//! ## Architecture
//!
//! ```text
//!                 TreeIndex { root }
//!                        │
//!                        ▼
//!                     ┌─────┐
//!                     │  m  │ parent: None
//!                     └─────┘
//!                    ╱       ╲
//!               ┌─────┐     ┌─────┐
//!               │  f  │     │  t  │
//!               └─────┘     └─────┘
//!              ╱      ╲
//!         ┌─────┐   ┌─────┐
//!         │  a  │   │  h  │
//!         └─────┘   └─────┘
//! ```
//!
//! A root has no parent; walking past it means reaching the end position,
//! which the owning cache represents with its sentinel.
//!
//! ## Removal
//!
//! Nodes with two children are removed by *predecessor splice*: the left
//! child takes the removed node's slot and the removed node's right subtree is
//! hung off the rightmost node of that left subtree.
//!
//! ```text
//!        p                     p
//!        │                     │
//!       [x]                   [l]
//!      ╱   ╲                 ╱   ╲
//!    [l]   [r]     ──►     ..    [lr]
//!   ╱   ╲                          ╲
//!  ..   [lr]                        [r]
//! ```
//!
//! No rebalancing is performed; the height is bounded only by the number of
//! records, so sorted insertion degrades lookups to O(n).

use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// Tree links embedded in every record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeLinks {
    pub parent: Option<SlotId>,
    pub left: Option<SlotId>,
    pub right: Option<SlotId>,
}

/// Access to the key and tree links of an arena record.
pub trait TreeNode {
    type Key: Ord;

    fn key(&self) -> &Self::Key;
    fn tree_links(&self) -> &TreeLinks;
    fn tree_links_mut(&mut self) -> &mut TreeLinks;
}

/// Which child slot of a parent a new record goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Outcome of a key search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Located {
    /// The tree is empty; a new record becomes the root.
    Empty,
    /// A record with an equal key exists.
    Found(SlotId),
    /// No equal key; a new record attaches below `parent` on `side`.
    Vacant { parent: SlotId, side: Side },
}

/// Root anchor of the key index.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeIndex {
    root: Option<SlotId>,
}

impl TreeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<SlotId> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Walks from the root toward `key`.
    ///
    /// Resolves lookup and insertion in one pass: an exact match yields
    /// [`Located::Found`], otherwise the last visited record is returned as
    /// the would-be parent. Also returns the number of records visited.
    pub fn locate<N, Q>(&self, arena: &SlotArena<N>, key: &Q) -> (Located, usize)
    where
        N: TreeNode,
        N::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(mut current) = self.root else {
            return (Located::Empty, 0);
        };
        let mut steps = 0;

        while let Some(node) = arena.get(current) {
            steps += 1;
            let links = node.tree_links();
            let (next, side) = match key.cmp(node.key().borrow()) {
                Ordering::Equal => return (Located::Found(current), steps),
                Ordering::Less => (links.left, Side::Left),
                Ordering::Greater => (links.right, Side::Right),
            };
            match next {
                Some(child) => current = child,
                None => {
                    return (
                        Located::Vacant {
                            parent: current,
                            side,
                        },
                        steps,
                    );
                },
            }
        }

        // Only reachable if a link points at a dead slot.
        (Located::Empty, steps)
    }

    /// Links a record into the position produced by [`locate`](Self::locate).
    ///
    /// The record's own links are reset first, so recycled records carry no
    /// stale children.
    pub fn attach<N: TreeNode>(
        &mut self,
        arena: &mut SlotArena<N>,
        id: SlotId,
        at: Located,
    ) -> Option<()> {
        let parent = match at {
            Located::Empty => {
                self.root = Some(id);
                None
            },
            Located::Vacant { parent, side } => {
                let links = arena.get_mut(parent)?.tree_links_mut();
                match side {
                    Side::Left => links.left = Some(id),
                    Side::Right => links.right = Some(id),
                }
                Some(parent)
            },
            Located::Found(_) => return None,
        };
        *arena.get_mut(id)?.tree_links_mut() = TreeLinks {
            parent,
            left: None,
            right: None,
        };
        Some(())
    }

    /// Unlinks `id` from the tree, keeping in-order sequence of the remaining
    /// records intact. The record stays in the arena with cleared links.
    pub fn detach<N: TreeNode>(&mut self, arena: &mut SlotArena<N>, id: SlotId) -> Option<()> {
        let links = *arena.get(id)?.tree_links();

        let replacement = match (links.left, links.right) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(right)) => {
                let rightmost = Self::rightmost(arena, left)?;
                arena.get_mut(rightmost)?.tree_links_mut().right = Some(right);
                arena.get_mut(right)?.tree_links_mut().parent = Some(rightmost);
                Some(left)
            },
        };

        if let Some(child) = replacement {
            arena.get_mut(child)?.tree_links_mut().parent = links.parent;
        }
        match links.parent {
            None => self.root = replacement,
            Some(parent) => {
                let parent_links = arena.get_mut(parent)?.tree_links_mut();
                if parent_links.left == Some(id) {
                    parent_links.left = replacement;
                } else {
                    parent_links.right = replacement;
                }
            },
        }

        *arena.get_mut(id)?.tree_links_mut() = TreeLinks::default();
        Some(())
    }

    /// Record with the smallest key.
    pub fn first<N: TreeNode>(&self, arena: &SlotArena<N>) -> Option<SlotId> {
        Self::leftmost(arena, self.root?)
    }

    /// Record with the largest key.
    pub fn last<N: TreeNode>(&self, arena: &SlotArena<N>) -> Option<SlotId> {
        Self::rightmost(arena, self.root?)
    }

    /// In-order successor of `id`; `None` means "past the largest key".
    pub fn successor<N: TreeNode>(arena: &SlotArena<N>, id: SlotId) -> Option<SlotId> {
        let links = *arena.get(id)?.tree_links();
        if let Some(right) = links.right {
            return Self::leftmost(arena, right);
        }
        let mut current = id;
        let mut parent = links.parent;
        while let Some(up) = parent {
            let up_links = arena.get(up)?.tree_links();
            if up_links.right != Some(current) {
                return Some(up);
            }
            current = up;
            parent = up_links.parent;
        }
        None
    }

    /// In-order predecessor of `id`; `None` means "before the smallest key".
    pub fn predecessor<N: TreeNode>(arena: &SlotArena<N>, id: SlotId) -> Option<SlotId> {
        let links = *arena.get(id)?.tree_links();
        if let Some(left) = links.left {
            return Self::rightmost(arena, left);
        }
        let mut current = id;
        let mut parent = links.parent;
        while let Some(up) = parent {
            let up_links = arena.get(up)?.tree_links();
            if up_links.left != Some(current) {
                return Some(up);
            }
            current = up;
            parent = up_links.parent;
        }
        None
    }

    /// Number of levels on the longest root-to-leaf path.
    pub fn height<N: TreeNode>(&self, arena: &SlotArena<N>) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(SlotId, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = arena.get(id) else {
                continue;
            };
            max_depth = max_depth.max(depth);
            let links = node.tree_links();
            stack.extend(links.left.map(|child| (child, depth + 1)));
            stack.extend(links.right.map(|child| (child, depth + 1)));
        }
        max_depth
    }

    /// Checks parent back-links and strict key ordering.
    ///
    /// Returns the record ids in ascending key order.
    pub fn validate<N: TreeNode>(&self, arena: &SlotArena<N>) -> Result<Vec<SlotId>, InvariantError> {
        let mut order = Vec::with_capacity(arena.len());
        let Some(root) = self.root else {
            return Ok(order);
        };

        let root_links = arena
            .get(root)
            .ok_or_else(|| InvariantError::new(format!("tree root {root:?} is a dead slot")))?
            .tree_links();
        if root_links.parent.is_some() {
            return Err(InvariantError::new("tree root has a parent link"));
        }

        // Iterative in-order walk; the tree may be a linear chain.
        let mut stack = Vec::new();
        let mut current = Some(root);
        let mut previous: Option<&N::Key> = None;

        while current.is_some() || !stack.is_empty() {
            while let Some(id) = current {
                let node = arena
                    .get(id)
                    .ok_or_else(|| InvariantError::new(format!("tree links dead slot {id:?}")))?;
                for child in [node.tree_links().left, node.tree_links().right]
                    .into_iter()
                    .flatten()
                {
                    let child_parent = arena.get(child).map(|c| c.tree_links().parent);
                    if child_parent != Some(Some(id)) {
                        return Err(InvariantError::new(format!(
                            "child {child:?} of {id:?} has parent {child_parent:?}"
                        )));
                    }
                }
                stack.push(id);
                if stack.len() + order.len() > arena.len() {
                    return Err(InvariantError::new("cycle detected in key index"));
                }
                current = node.tree_links().left;
            }

            let Some(id) = stack.pop() else {
                break;
            };
            let node = arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("tree links dead slot {id:?}")))?;
            if let Some(previous) = previous {
                if previous >= node.key() {
                    return Err(InvariantError::new(format!(
                        "in-order keys not strictly ascending at {id:?}"
                    )));
                }
            }
            previous = Some(node.key());
            order.push(id);
            current = node.tree_links().right;
        }

        Ok(order)
    }

    fn leftmost<N: TreeNode>(arena: &SlotArena<N>, mut id: SlotId) -> Option<SlotId> {
        while let Some(left) = arena.get(id)?.tree_links().left {
            id = left;
        }
        Some(id)
    }

    fn rightmost<N: TreeNode>(arena: &SlotArena<N>, mut id: SlotId) -> Option<SlotId> {
        while let Some(right) = arena.get(id)?.tree_links().right {
            id = right;
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Rec {
        key: u32,
        links: TreeLinks,
    }

    impl TreeNode for Rec {
        type Key = u32;

        fn key(&self) -> &u32 {
            &self.key
        }

        fn tree_links(&self) -> &TreeLinks {
            &self.links
        }

        fn tree_links_mut(&mut self) -> &mut TreeLinks {
            &mut self.links
        }
    }

    fn build(keys: &[u32]) -> (SlotArena<Rec>, TreeIndex) {
        let mut arena = SlotArena::new();
        let mut tree = TreeIndex::new();
        for &key in keys {
            let (at, _) = tree.locate(&arena, &key);
            assert!(!matches!(at, Located::Found(_)), "duplicate key {key}");
            let id = arena.insert(Rec {
                key,
                links: TreeLinks::default(),
            });
            tree.attach(&mut arena, id, at).unwrap();
        }
        (arena, tree)
    }

    fn id_of(arena: &SlotArena<Rec>, tree: &TreeIndex, key: u32) -> SlotId {
        match tree.locate(arena, &key).0 {
            Located::Found(id) => id,
            other => panic!("key {key} not found: {other:?}"),
        }
    }

    fn keys_in_order(arena: &SlotArena<Rec>, tree: &TreeIndex) -> Vec<u32> {
        tree.validate(arena)
            .unwrap()
            .into_iter()
            .map(|id| arena.get(id).unwrap().key)
            .collect()
    }

    #[test]
    fn locate_on_empty_tree() {
        let (arena, tree) = build(&[]);
        assert_eq!(tree.locate(&arena, &7), (Located::Empty, 0));
    }

    #[test]
    fn locate_returns_would_be_parent() {
        let (arena, tree) = build(&[50, 30, 70]);
        let thirty = id_of(&arena, &tree, 30);
        assert_eq!(
            tree.locate(&arena, &20),
            (
                Located::Vacant {
                    parent: thirty,
                    side: Side::Left
                },
                2
            )
        );
    }

    #[test]
    fn successor_and_predecessor_walk_in_order() {
        let (arena, tree) = build(&[50, 30, 70, 20, 40, 60, 80, 35]);

        let mut forward = Vec::new();
        let mut cursor = tree.first(&arena);
        while let Some(id) = cursor {
            forward.push(arena.get(id).unwrap().key);
            cursor = TreeIndex::successor(&arena, id);
        }
        assert_eq!(forward, vec![20, 30, 35, 40, 50, 60, 70, 80]);

        let mut backward = Vec::new();
        let mut cursor = tree.last(&arena);
        while let Some(id) = cursor {
            backward.push(arena.get(id).unwrap().key);
            cursor = TreeIndex::predecessor(&arena, id);
        }
        assert_eq!(backward, vec![80, 70, 60, 50, 40, 35, 30, 20]);
    }

    #[test]
    fn detach_leaf() {
        let (mut arena, mut tree) = build(&[50, 30, 70]);
        let thirty = id_of(&arena, &tree, 30);
        tree.detach(&mut arena, thirty).unwrap();
        assert_eq!(keys_in_order(&arena, &tree), vec![50, 70]);
        assert_eq!(*arena.get(thirty).unwrap().tree_links(), TreeLinks::default());
    }

    #[test]
    fn detach_single_child_splices_child_up() {
        let (mut arena, mut tree) = build(&[50, 30, 20]);
        let thirty = id_of(&arena, &tree, 30);
        let twenty = id_of(&arena, &tree, 20);
        let fifty = id_of(&arena, &tree, 50);
        tree.detach(&mut arena, thirty).unwrap();

        assert_eq!(arena.get(twenty).unwrap().links.parent, Some(fifty));
        assert_eq!(arena.get(fifty).unwrap().links.left, Some(twenty));
        assert_eq!(keys_in_order(&arena, &tree), vec![20, 50]);
    }

    #[test]
    fn detach_two_children_uses_predecessor_splice() {
        //        50
        //      /    \
        //    30      70
        //   /  \
        //  20   40
        //         \
        //          45
        let (mut arena, mut tree) = build(&[50, 30, 70, 20, 40, 45]);
        let fifty = id_of(&arena, &tree, 50);
        let thirty = id_of(&arena, &tree, 30);
        let seventy = id_of(&arena, &tree, 70);
        let forty_five = id_of(&arena, &tree, 45);

        tree.detach(&mut arena, fifty).unwrap();

        // Left child takes the root slot.
        assert_eq!(tree.root(), Some(thirty));
        assert_eq!(arena.get(thirty).unwrap().links.parent, None);
        // Right subtree hangs off the rightmost node of the left subtree.
        assert_eq!(arena.get(forty_five).unwrap().links.right, Some(seventy));
        assert_eq!(arena.get(seventy).unwrap().links.parent, Some(forty_five));
        assert_eq!(keys_in_order(&arena, &tree), vec![20, 30, 40, 45, 70]);
    }

    #[test]
    fn detach_two_children_below_root_rewires_parent_side() {
        let (mut arena, mut tree) = build(&[10, 50, 30, 70]);
        let ten = id_of(&arena, &tree, 10);
        let fifty = id_of(&arena, &tree, 50);
        let thirty = id_of(&arena, &tree, 30);
        let seventy = id_of(&arena, &tree, 70);

        tree.detach(&mut arena, fifty).unwrap();

        assert_eq!(arena.get(ten).unwrap().links.right, Some(thirty));
        assert_eq!(arena.get(thirty).unwrap().links.parent, Some(ten));
        assert_eq!(arena.get(thirty).unwrap().links.right, Some(seventy));
        assert_eq!(keys_in_order(&arena, &tree), vec![10, 30, 70]);
    }

    #[test]
    fn detach_root_of_chain_and_height() {
        let (mut arena, mut tree) = build(&[1, 2, 3, 4, 5]);
        assert_eq!(tree.height(&arena), 5);
        let one = id_of(&arena, &tree, 1);
        tree.detach(&mut arena, one).unwrap();
        assert_eq!(tree.height(&arena), 4);
        assert_eq!(keys_in_order(&arena, &tree), vec![2, 3, 4, 5]);
    }

    #[test]
    fn attach_rejects_found_position() {
        let (mut arena, mut tree) = build(&[5]);
        let five = id_of(&arena, &tree, 5);
        let extra = arena.insert(Rec {
            key: 5,
            links: TreeLinks::default(),
        });
        assert_eq!(tree.attach(&mut arena, extra, Located::Found(five)), None);
    }

    #[test]
    fn validate_detects_order_violation() {
        let (mut arena, tree) = build(&[50, 30]);
        let thirty = id_of(&arena, &tree, 30);
        arena.get_mut(thirty).unwrap().key = 60;
        assert!(tree.validate(&arena).is_err());
    }
}
