pub mod recency_list;
pub mod slot_arena;
pub mod tree_index;

pub use recency_list::{ListLinks, ListNode, RecencyList};
pub use slot_arena::{SlotArena, SlotId};
pub use tree_index::{Located, Side, TreeIndex, TreeLinks, TreeNode};
