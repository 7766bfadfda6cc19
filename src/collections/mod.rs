//! Sequence containers.
//!
//! Collections are organized by level:
//! - `list`: arena-backed linked sequences (the `Block` building block)
//! - `deque`: the chunked deque built from a list of blocks

pub mod deque;
pub mod list;

pub use deque::{Cursor, Deque, IntoIter, Iter, IterMut, Position};
pub use list::{Block, BlockIter, BlockPos, ContainerId, NodeRef};
