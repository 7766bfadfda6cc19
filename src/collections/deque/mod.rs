//! `Deque`: a chunked (unrolled) deque.
//!
//! Elements are kept in blocks of roughly `sqrt(n)` nodes. The blocks are
//! themselves the elements of an outer [`Block`], so both levels share one
//! linked-sequence implementation:
//!
//! ```text
//!  outer index:  [ chain ] <-> [ chain ] <-> [ chain ] -> end
//!                    |             |             |
//!  node arena:   a <-> b       c <-> d <-> e     f
//! ```
//!
//! Every element node lives in a single arena owned by the deque, and each
//! node records which block holds it. Splitting an over-full block or merging
//! an under-full one relinks nodes in place, so a [`Position`] keeps naming
//! the same element across rebalancing. A position is invalidated only when
//! the element it names is removed, or when the deque is cleared.
//!
//! # Complexity
//! - `push_*`, `pop_*`, `front`, `back`: O(1) plus at most one O(sqrt n) split
//!   or merge.
//! - `at`, `seek`, `advance`, `offset_of`: O(blocks + block size) = O(sqrt n).
//! - `insert`, `erase` at a position: O(1) splice plus one split or merge.

mod cursor;
mod iter;
mod position;
mod sizing;

pub use cursor::Cursor;
pub use iter::{IntoIter, Iter, IterMut};
pub use position::Position;

use self::sizing::BlockSizing;
use crate::collections::list::{Arena, Block, Chain, ContainerId};
use crate::{DequeConfig, DequeError};
use core::fmt;
use core::ops::{Index, IndexMut};

/// A double-ended queue stored as a list of linked blocks.
///
/// # Example
/// ```rust
/// use unrolled_deque::Deque;
///
/// let mut deque = Deque::new();
/// for i in 1..=5 {
///     deque.push_back(i);
/// }
/// deque.pop_front().unwrap();
///
/// let pos = deque.advance(deque.begin(), 1).unwrap();
/// let pos = deque.insert(pos, 99).unwrap();
/// assert_eq!(deque.get(pos), Ok(&99));
/// assert_eq!(deque.iter().copied().collect::<Vec<_>>(), [2, 99, 3, 4, 5]);
/// ```
pub struct Deque<T> {
    id: ContainerId,
    nodes: Arena<T>,
    index: Block<Chain>,
    len: usize,
    sizing: BlockSizing,
}

impl<T> Deque<T> {
    /// Creates an empty deque with the default configuration.
    pub fn new() -> Self {
        Self::from_parts(DequeConfig::default())
    }

    /// Creates an empty deque with a custom block sizing configuration.
    ///
    /// # Errors
    /// [`DequeError::InvalidConfig`] if the configuration is rejected by
    /// [`DequeConfig::validate`].
    pub fn with_config(config: DequeConfig) -> Result<Self, DequeError> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    fn from_parts(config: DequeConfig) -> Self {
        Self {
            id: ContainerId::fresh(),
            nodes: Arena::new(),
            index: Block::new(),
            len: 0,
            sizing: BlockSizing::new(config),
        }
    }

    /// Returns the configuration this deque was built with.
    pub fn config(&self) -> DequeConfig {
        self.sizing.config()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of blocks in the outer index.
    pub fn block_count(&self) -> usize {
        self.index.len()
    }

    /// Returns the block size the deque currently rebalances toward.
    pub fn target_block_size(&self) -> usize {
        self.sizing.current()
    }

    /// Returns the length of each block, front to back.
    pub fn block_lens(&self) -> impl Iterator<Item = usize> + '_ {
        self.index.iter().map(Chain::len)
    }

    /// Returns the first element.
    ///
    /// # Errors
    /// [`DequeError::EmptyContainer`] if the deque is empty.
    pub fn front(&self) -> Result<&T, DequeError> {
        let slot = self.first_slot().ok_or(DequeError::EmptyContainer)?;
        Ok(&self.nodes.node(slot).value)
    }

    /// Returns the last element.
    ///
    /// # Errors
    /// [`DequeError::EmptyContainer`] if the deque is empty.
    pub fn back(&self) -> Result<&T, DequeError> {
        let slot = self.last_slot().ok_or(DequeError::EmptyContainer)?;
        Ok(&self.nodes.node(slot).value)
    }

    /// Returns the first element mutably.
    ///
    /// # Errors
    /// [`DequeError::EmptyContainer`] if the deque is empty.
    pub fn front_mut(&mut self) -> Result<&mut T, DequeError> {
        let slot = self.first_slot().ok_or(DequeError::EmptyContainer)?;
        Ok(&mut self.nodes.node_mut(slot).value)
    }

    /// Returns the last element mutably.
    ///
    /// # Errors
    /// [`DequeError::EmptyContainer`] if the deque is empty.
    pub fn back_mut(&mut self) -> Result<&mut T, DequeError> {
        let slot = self.last_slot().ok_or(DequeError::EmptyContainer)?;
        Ok(&mut self.nodes.node_mut(slot).value)
    }

    /// Returns the element at logical `index`.
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfBound`] if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, DequeError> {
        let slot = self.locate(index).ok_or(DequeError::IndexOutOfBound)?;
        Ok(&self.nodes.node(slot).value)
    }

    /// Mutable counterpart of [`at`](Self::at).
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfBound`] if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, DequeError> {
        let slot = self.locate(index).ok_or(DequeError::IndexOutOfBound)?;
        Ok(&mut self.nodes.node_mut(slot).value)
    }

    /// Appends an element.
    pub fn push_back(&mut self, value: T) {
        self.push_back_slot(value);
    }

    /// Prepends an element.
    pub fn push_front(&mut self, value: T) {
        let block = match self.index.head_slot() {
            Some(block) => block,
            None => self.open_block(),
        };
        self.index.value_mut(block).push_front(&mut self.nodes, value);
        self.len += 1;
        self.expand(block);
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    /// [`DequeError::EmptyContainer`] if the deque is empty.
    pub fn pop_back(&mut self) -> Result<T, DequeError> {
        let block = self.index.tail_slot().ok_or(DequeError::EmptyContainer)?;
        let value = self
            .index
            .value_mut(block)
            .pop_back(&mut self.nodes)
            .ok_or(DequeError::EmptyContainer)?;
        self.len -= 1;
        self.settle(block);
        Ok(value)
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    /// [`DequeError::EmptyContainer`] if the deque is empty.
    pub fn pop_front(&mut self) -> Result<T, DequeError> {
        let block = self.index.head_slot().ok_or(DequeError::EmptyContainer)?;
        let value = self
            .index
            .value_mut(block)
            .pop_front(&mut self.nodes)
            .ok_or(DequeError::EmptyContainer)?;
        self.len -= 1;
        self.settle(block);
        Ok(value)
    }

    /// Inserts `value` before `pos` and returns the position of the new element.
    ///
    /// Inserting at [`end`](Self::end) is a `push_back`.
    ///
    /// # Errors
    /// [`DequeError::InvalidIterator`] if `pos` belongs to another deque or
    /// names a removed element.
    pub fn insert(&mut self, pos: Position, value: T) -> Result<Position, DequeError> {
        let slot = match self.resolve(pos)? {
            Some(at) => {
                let block = self.nodes.node(at).owner;
                let slot = self.index.value_mut(block).insert_before(&mut self.nodes, at, value);
                self.len += 1;
                self.expand(block);
                slot
            }
            None => self.push_back_slot(value),
        };
        Ok(self.position(Some(slot)))
    }

    /// Removes the element at `pos` and returns the position of its follower,
    /// or [`end`](Self::end) if it was the last element.
    ///
    /// # Errors
    /// [`DequeError::EmptyContainer`] if the deque is empty;
    /// [`DequeError::InvalidIterator`] if `pos` is the end, belongs to another
    /// deque, or names a removed element.
    pub fn erase(&mut self, pos: Position) -> Result<Position, DequeError> {
        self.remove(pos).map(|(_, next)| next)
    }

    /// Like [`erase`](Self::erase), but also returns the removed element.
    ///
    /// # Errors
    /// Same as [`erase`](Self::erase).
    pub fn remove(&mut self, pos: Position) -> Result<(T, Position), DequeError> {
        if self.len == 0 {
            return Err(DequeError::EmptyContainer);
        }
        let at = self.resolve(pos)?.ok_or(DequeError::InvalidIterator)?;
        // Captured before unlinking; node slots survive the merge in `settle`.
        let follower = self.successor(at);
        let block = self.nodes.node(at).owner;

        let value = self.index.value_mut(block).remove(&mut self.nodes, at);
        self.len -= 1;
        self.settle(block);
        Ok((value, self.position(follower)))
    }

    /// Removes every element and resets block sizing.
    ///
    /// All outstanding positions except [`end`](Self::end) become invalid.
    pub fn clear(&mut self) {
        self.len = 0;
        self.sizing.reset();
        self.nodes.clear();
        self.index.clear();
    }

    /// Returns the position of the first element, or the end if empty.
    pub fn begin(&self) -> Position {
        self.position(self.first_slot())
    }

    /// Returns the one-past-the-end position.
    pub fn end(&self) -> Position {
        self.position(None)
    }

    /// Returns a read-only cursor at the first element.
    pub fn cbegin(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.begin())
    }

    /// Returns a read-only cursor at the end.
    pub fn cend(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.end())
    }

    /// Wraps `pos` in a read-only cursor over this deque.
    pub fn cursor(&self, pos: Position) -> Cursor<'_, T> {
        Cursor::new(self, pos)
    }

    /// Iterates the elements front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Iterates the elements front to back, mutably.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let front = self.first_slot();
        let back = self.last_slot();
        IterMut::new(self.nodes.raw_nodes(), &self.index, front, back, self.len)
    }

    /// Checks the structural invariants.
    ///
    /// Holds after every public call: no block is empty, no block holds more
    /// than twice [`target_block_size`](Self::target_block_size), block
    /// lengths sum to `len()`, and every node is tagged with the block that
    /// links it.
    ///
    /// # Errors
    /// Returns a description of the first violated invariant. A violation is
    /// a defect in the deque rather than a caller error, so it is reported as
    /// a plain message instead of a [`DequeError`].
    pub fn validate(&self) -> Result<(), &'static str> {
        let bound = self.sizing.current().saturating_mul(2);
        let mut total = 0;

        for block in self.index.slots() {
            let chain = self.index.value(block);
            if chain.is_empty() {
                return Err("empty block in the outer index");
            }
            if chain.len() > bound {
                return Err("block exceeds twice the target size");
            }
            if chain.tag != block {
                return Err("block tag does not match its slot");
            }

            let mut count = 0;
            let mut prev = None;
            for slot in chain.slots(&self.nodes) {
                let node = self.nodes.node(slot);
                if node.owner != block {
                    return Err("node tagged with the wrong block");
                }
                if node.prev != prev {
                    return Err("broken back link");
                }
                prev = Some(slot);
                count += 1;
            }
            if count != chain.len() || chain.tail() != prev {
                return Err("block length does not match its nodes");
            }
            total += count;
        }

        if total != self.len {
            return Err("length does not match block contents");
        }
        if self.nodes.len() != self.len {
            return Err("arena holds unreachable nodes");
        }
        Ok(())
    }

    // --- internals ---

    fn first_slot(&self) -> Option<usize> {
        self.index.head_slot().and_then(|block| self.index.value(block).head())
    }

    fn last_slot(&self) -> Option<usize> {
        self.index.tail_slot().and_then(|block| self.index.value(block).tail())
    }

    /// Appends an empty block to the outer index.
    fn open_block(&mut self) -> usize {
        let block = self.index.push_back_slot(Chain::default());
        self.index.value_mut(block).tag = block;
        block
    }

    fn push_back_slot(&mut self, value: T) -> usize {
        let block = match self.index.tail_slot() {
            Some(block) => block,
            None => self.open_block(),
        };
        let slot = self.index.value_mut(block).push_back(&mut self.nodes, value);
        self.len += 1;
        self.expand(block);
        slot
    }

    /// Drops `block` if a removal emptied it, otherwise tries to merge it.
    fn settle(&mut self, block: usize) {
        if self.index.value(block).is_empty() {
            self.index.remove_slot(block);
            self.retarget();
        } else {
            let target = self.retarget();
            self.compress(block, target);
        }
    }

    /// Refreshes the sizing state for the current length and returns the
    /// target block size.
    ///
    /// A lowered target re-splits every block that no longer fits under it.
    fn retarget(&mut self) -> usize {
        if self.sizing.refresh(self.len) {
            self.split_oversized();
        }
        self.sizing.current()
    }

    /// Cuts target-sized blocks off the front of every block holding twice
    /// the target or more. O(n) per call.
    fn split_oversized(&mut self) {
        let target = self.sizing.current();
        let limit = target.saturating_mul(2);
        let mut block = self.index.head_slot();
        while let Some(current) = block {
            while self.index.value(current).len() >= limit {
                #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
                let fresh = self.split(current, target);
                #[cfg(feature = "tracing")]
                tracing::trace!(block = current, fresh, target, "re-split block after target drop");
            }
            block = self.index.next_slot(current);
        }
    }

    /// Moves the first `count` nodes of `block` into a new block linked
    /// before it and returns the new block's slot.
    fn split(&mut self, block: usize, count: usize) -> usize {
        let fresh = self.index.insert_before_slot(block, Chain::default());
        let front = self
            .index
            .value_mut(block)
            .split_front(&mut self.nodes, count, fresh);
        *self.index.value_mut(fresh) = front;
        fresh
    }

    /// Splits `block` in two once it reaches twice the target size.
    ///
    /// The front half moves into a new block linked before it.
    fn expand(&mut self, block: usize) {
        let target = self.retarget();
        let count = self.index.value(block).len();
        if count < target.saturating_mul(2) {
            return;
        }

        #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
        let fresh = self.split(block, count / 2);

        #[cfg(feature = "tracing")]
        tracing::trace!(block, fresh, count, target, "split block");
    }

    /// Merges `block` with a neighbour if the pair fits in `target`.
    ///
    /// The previous neighbour is preferred; the absorbed block is dropped.
    fn compress(&mut self, block: usize, target: usize) {
        let count = self.index.value(block).len();

        if let Some(prev) = self.index.prev_slot(block) {
            if self.index.value(prev).len() + count <= target {
                let absorbed = self.index.remove_slot(prev);
                self.index.value_mut(block).prepend(&mut self.nodes, absorbed);
                #[cfg(feature = "tracing")]
                tracing::trace!(block, absorbed = prev, target, "merged previous block");
                return;
            }
        }

        if let Some(next) = self.index.next_slot(block) {
            if self.index.value(next).len() + count <= target {
                let absorbed = self.index.remove_slot(next);
                self.index.value_mut(block).append(&mut self.nodes, absorbed);
                #[cfg(feature = "tracing")]
                tracing::trace!(block, absorbed = next, target, "merged next block");
            }
        }
    }

    /// Finds the node at logical `index` by skipping whole blocks.
    fn locate(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        let mut remaining = index;
        for block in self.index.slots() {
            let chain = self.index.value(block);
            if remaining < chain.len() {
                return chain.nth(&self.nodes, remaining);
            }
            remaining -= chain.len();
        }
        None
    }

    /// The node after `slot`, crossing into the next block if needed.
    pub(crate) fn successor(&self, slot: usize) -> Option<usize> {
        let node = self.nodes.node(slot);
        node.next.or_else(|| {
            self.index
                .next_slot(node.owner)
                .and_then(|block| self.index.value(block).head())
        })
    }

    /// The node before `slot`, crossing into the previous block if needed.
    pub(crate) fn predecessor(&self, slot: usize) -> Option<usize> {
        let node = self.nodes.node(slot);
        node.prev.or_else(|| {
            self.index
                .prev_slot(node.owner)
                .and_then(|block| self.index.value(block).tail())
        })
    }

    pub(crate) fn value(&self, slot: usize) -> &T {
        &self.nodes.node(slot).value
    }

    pub(crate) fn first_and_last(&self) -> (Option<usize>, Option<usize>) {
        (self.first_slot(), self.last_slot())
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy with a fresh identity: positions of the original are foreign
/// to the copy.
impl<T: Clone> Clone for Deque<T> {
    fn clone(&self) -> Self {
        Self {
            id: ContainerId::fresh(),
            nodes: self.nodes.clone(),
            index: self.index.clone(),
            len: self.len,
            sizing: self.sizing.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> Index<usize> for Deque<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}: index {index} with len {}", self.len),
        }
    }
}

impl<T> IndexMut<usize> for Deque<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.at_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}: index {index} with len {len}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Deque<i32> {
        Deque::with_config(DequeConfig::new().with_min_block_size(2)).unwrap()
    }

    fn contents(deque: &Deque<i32>) -> Vec<i32> {
        deque.iter().copied().collect()
    }

    #[test]
    fn test_push_pop_scenario() {
        let mut deque = Deque::new();
        for i in 1..=5 {
            deque.push_back(i);
        }
        assert_eq!(deque.front(), Ok(&1));
        assert_eq!(deque.back(), Ok(&5));
        assert_eq!(deque.len(), 5);

        assert_eq!(deque.pop_front(), Ok(1));
        assert_eq!(deque.front(), Ok(&2));
        assert_eq!(deque.len(), 4);

        let pos = deque.advance(deque.begin(), 1).unwrap();
        let inserted = deque.insert(pos, 99).unwrap();
        assert_eq!(deque.get(inserted), Ok(&99));
        assert_eq!(contents(&deque), vec![2, 99, 3, 4, 5]);

        let next = deque.erase(deque.begin()).unwrap();
        assert_eq!(deque.get(next), Ok(&99));
        assert_eq!(contents(&deque), vec![99, 3, 4, 5]);
        assert!(deque.validate().is_ok());
    }

    #[test]
    fn test_empty_errors() {
        let mut deque: Deque<i32> = Deque::new();
        assert_eq!(deque.front(), Err(DequeError::EmptyContainer));
        assert_eq!(deque.back(), Err(DequeError::EmptyContainer));
        assert_eq!(deque.pop_back(), Err(DequeError::EmptyContainer));
        assert_eq!(deque.pop_front(), Err(DequeError::EmptyContainer));
        assert_eq!(deque.erase(deque.end()), Err(DequeError::EmptyContainer));
        assert_eq!(deque.at(0), Err(DequeError::IndexOutOfBound));
        assert_eq!(deque.begin(), deque.end());
        assert_eq!(deque.block_count(), 0);
    }

    #[test]
    fn test_expand_splits_front_half() {
        let mut deque = small();
        // Target is 2, so a block splits when it reaches 4 elements.
        for i in 0..3 {
            deque.push_back(i);
        }
        assert_eq!(deque.block_count(), 1);
        deque.push_back(3);
        assert_eq!(deque.block_count(), 2);
        assert_eq!(contents(&deque), vec![0, 1, 2, 3]);

        let first = deque.index.head_slot().unwrap();
        assert_eq!(deque.index.value(first).len(), 2);
        assert!(deque.validate().is_ok());
    }

    #[test]
    fn test_push_front_splits_head_block() {
        let mut deque = small();
        for i in 0..4 {
            deque.push_front(i);
        }
        assert_eq!(deque.block_count(), 2);
        assert_eq!(contents(&deque), vec![3, 2, 1, 0]);
        assert!(deque.validate().is_ok());
    }

    #[test]
    fn test_shrinking_drops_empty_blocks() {
        let mut deque = small();
        for i in 0..8 {
            deque.push_back(i);
        }
        assert_eq!(deque.block_count(), 4);
        while deque.len() > 2 {
            deque.pop_back().unwrap();
            assert!(deque.validate().is_ok());
        }
        assert_eq!(deque.block_count(), 1);
        assert_eq!(contents(&deque), vec![0, 1]);
    }

    fn three_blocks_of_four() -> Deque<i32> {
        let mut deque = Deque::with_config(DequeConfig::new().with_min_block_size(4)).unwrap();
        deque.extend(0..12);
        assert_eq!(deque.block_count(), 3);
        deque
    }

    #[test]
    fn test_compress_prefers_previous_block() {
        let mut deque = three_blocks_of_four();
        for value in [1, 2, 5] {
            let pos = deque.seek(deque.iter().position(|&v| v == value).unwrap()).unwrap();
            deque.erase(pos).unwrap();
        }
        assert_eq!(deque.block_count(), 3);

        // Middle block [4, 6, 7] becomes [4, 7]; together with [0, 3] it fits.
        let six = deque.seek(3).unwrap();
        let next = deque.erase(six).unwrap();
        assert_eq!(deque.get(next), Ok(&7));
        assert_eq!(deque.block_count(), 2);
        assert_eq!(contents(&deque), vec![0, 3, 4, 7, 8, 9, 10, 11]);
        assert!(deque.validate().is_ok());
    }

    #[test]
    fn test_compress_falls_back_to_next_block() {
        let mut deque = three_blocks_of_four();
        for value in [5, 6, 1] {
            let pos = deque.seek(deque.iter().position(|&v| v == value).unwrap()).unwrap();
            deque.erase(pos).unwrap();
        }
        assert_eq!(deque.block_count(), 3);

        // Head block [0, 2, 3] becomes [0, 3] and absorbs [4, 7].
        let two = deque.seek(1).unwrap();
        let next = deque.erase(two).unwrap();
        assert_eq!(deque.get(next), Ok(&3));
        assert_eq!(deque.block_count(), 2);
        assert_eq!(contents(&deque), vec![0, 3, 4, 7, 8, 9, 10, 11]);
        assert!(deque.validate().is_ok());
    }

    #[test]
    fn test_pop_drops_emptied_block() {
        let mut deque = small();
        for i in 0..4 {
            deque.push_back(i);
        }
        assert_eq!(deque.pop_front(), Ok(0));
        assert_eq!(deque.pop_front(), Ok(1));
        assert_eq!(deque.block_count(), 1);
        assert_eq!(contents(&deque), vec![2, 3]);
    }

    #[test]
    fn test_erase_last_returns_end() {
        let mut deque = small();
        deque.push_back(1);
        let end = deque.erase(deque.begin()).unwrap();
        assert_eq!(end, deque.end());
        assert!(deque.is_empty());
        assert_eq!(deque.block_count(), 0);
    }

    #[test]
    fn test_erase_across_block_boundary() {
        let mut deque = small();
        for i in 0..4 {
            deque.push_back(i);
        }
        // Blocks are [0, 1] [2, 3]; 1 is the tail of the first block.
        let tail_of_first = deque.seek(1).unwrap();
        let next = deque.erase(tail_of_first).unwrap();
        assert_eq!(deque.get(next), Ok(&2));
        assert_eq!(contents(&deque), vec![0, 2, 3]);
        assert!(deque.validate().is_ok());
    }

    #[test]
    fn test_insert_at_end_pushes_back() {
        let mut deque = small();
        deque.push_back(1);
        let pos = deque.insert(deque.end(), 2).unwrap();
        assert_eq!(deque.get(pos), Ok(&2));
        assert_eq!(deque.offset_of(pos), Ok(1));
        assert_eq!(contents(&deque), vec![1, 2]);
    }

    #[test]
    fn test_insert_rejects_foreign_and_stale_positions() {
        let mut deque = small();
        let other = small();
        deque.push_back(1);
        assert_eq!(deque.insert(other.end(), 5), Err(DequeError::InvalidIterator));

        let pos = deque.begin();
        deque.erase(pos).unwrap();
        assert_eq!(deque.insert(pos, 5), Err(DequeError::InvalidIterator));
        deque.push_back(2);
        assert_eq!(deque.erase(pos), Err(DequeError::InvalidIterator));
        assert_eq!(deque.erase(deque.end()), Err(DequeError::InvalidIterator));
        assert_eq!(contents(&deque), vec![2]);
    }

    #[test]
    fn test_positions_survive_split_and_merge() {
        let mut deque = small();
        deque.push_back(10);
        let tracked = deque.begin();
        for i in 0..20 {
            deque.push_back(i);
        }
        assert!(deque.block_count() > 1);
        assert_eq!(deque.get(tracked), Ok(&10));

        while deque.len() > 1 {
            deque.pop_back().unwrap();
        }
        assert_eq!(deque.get(tracked), Ok(&10));
        assert_eq!(deque.offset_of(tracked), Ok(0));
    }

    #[test]
    fn test_clear_resets() {
        let mut deque = small();
        deque.extend(0..50);
        let stale = deque.begin();
        deque.clear();
        assert_eq!(deque.len(), 0);
        assert!(deque.is_empty());
        assert_eq!(deque.begin(), deque.end());
        assert_eq!(deque.target_block_size(), 2);
        assert_eq!(deque.get(stale), Err(DequeError::InvalidIterator));
        assert!(deque.validate().is_ok());

        deque.push_back(7);
        assert_eq!(deque.front(), Ok(&7));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = small();
        original.extend(0..10);
        let mut copy = original.clone();
        copy.push_back(10);
        *copy.front_mut().unwrap() = -1;
        original.pop_back().unwrap();

        assert_eq!(contents(&original), (0..9).collect::<Vec<_>>());
        assert_eq!(copy.front(), Ok(&-1));
        assert_eq!(copy.len(), 11);
        assert_eq!(copy.get(original.begin()), Err(DequeError::InvalidIterator));
    }

    #[test]
    fn test_index_operator() {
        let mut deque: Deque<i32> = (0..10).collect();
        deque[3] = 30;
        assert_eq!(deque[3], 30);
        assert_eq!(deque.at_mut(10), Err(DequeError::IndexOutOfBound));
    }

    #[test]
    #[should_panic(expected = "index out of bound")]
    fn test_index_operator_panics() {
        let deque: Deque<i32> = (0..3).collect();
        let _ = deque[3];
    }

    #[test]
    fn test_sizing_is_per_instance() {
        let mut large = Deque::with_config(DequeConfig::new().with_min_block_size(1)).unwrap();
        large.extend(0..10_000);
        let fresh: Deque<i32> = Deque::with_config(DequeConfig::new().with_min_block_size(1)).unwrap();
        assert!(large.target_block_size() > 1);
        assert_eq!(fresh.target_block_size(), 1);
    }

    #[test]
    fn test_target_drop_resplits_old_blocks() {
        let mut deque = Deque::with_config(DequeConfig::new().with_min_block_size(1)).unwrap();
        deque.extend(0..100_000);
        let grown = deque.target_block_size();
        while deque.len() > 20_000 {
            deque.pop_front().unwrap();
        }
        let pos = deque.seek(deque.len() / 2).unwrap();
        deque.erase(pos).unwrap();

        let target = deque.target_block_size();
        assert!(target < grown, "target {target} did not drop from {grown}");
        let worst = deque.block_lens().max().unwrap();
        assert!(worst <= 2 * target, "block of {worst} over target {target}");
        assert!(deque.validate().is_ok(), "{:?}", deque.validate());
        assert!(deque.iter().copied().eq((80_000..100_000).filter(|&v| v != 90_000)));
    }

    #[test]
    fn test_validate_reports_mistagged_block() {
        let mut deque = small();
        deque.extend(0..6);
        assert!(deque.validate().is_ok());
        let block = deque.index.head_slot().unwrap();
        deque.index.value_mut(block).tag = usize::MAX;
        assert_eq!(deque.validate(), Err("block tag does not match its slot"));
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let result = Deque::<i32>::with_config(DequeConfig::new().with_min_block_size(0));
        assert!(matches!(result, Err(DequeError::InvalidConfig(_))));
    }
}
