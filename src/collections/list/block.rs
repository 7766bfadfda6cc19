//! `Block`: an owned doubly linked sequence with a sentinel end position.
//!
//! A block keeps its nodes in an [`Arena`] and orders them with a single
//! [`Chain`]. Head and tail operations are O(1), indexed access walks from
//! the head, and [`BlockPos`] cursors splice at interior nodes in O(1).
//!
//! The deque uses `Block<Chain>` as its outer index, so both levels of the
//! structure share this implementation.

use super::arena::{Arena, ContainerId, NodeRef};
use super::chain::{Chain, Slots};
use crate::DequeError;
use core::fmt;

/// A position within a [`Block`].
///
/// `End` is the one-past-the-end sentinel; `Null` is a position that was
/// never attached to anything. Live positions carry the identity of the block
/// that produced them, and equality is node identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockPos {
    /// A detached position.
    #[default]
    Null,
    /// A live node of the given block.
    At(ContainerId, NodeRef),
    /// One past the last node of the given block.
    End(ContainerId),
}

/// A doubly linked sequence of elements.
pub struct Block<T> {
    id: ContainerId,
    arena: Arena<T>,
    chain: Chain,
}

impl<T> Block<T> {
    /// Creates an empty block.
    pub fn new() -> Self {
        Self {
            id: ContainerId::fresh(),
            arena: Arena::new(),
            chain: Chain::new(0),
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Returns `true` if the block holds no elements.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Returns the first element.
    ///
    /// # Errors
    /// [`DequeError::EmptyContainer`] if the block is empty.
    pub fn front(&self) -> Result<&T, DequeError> {
        let head = self.chain.head().ok_or(DequeError::EmptyContainer)?;
        Ok(&self.arena.node(head).value)
    }

    /// Returns the last element.
    ///
    /// # Errors
    /// [`DequeError::EmptyContainer`] if the block is empty.
    pub fn back(&self) -> Result<&T, DequeError> {
        let tail = self.chain.tail().ok_or(DequeError::EmptyContainer)?;
        Ok(&self.arena.node(tail).value)
    }

    /// Returns the first element mutably.
    ///
    /// # Errors
    /// [`DequeError::EmptyContainer`] if the block is empty.
    pub fn front_mut(&mut self) -> Result<&mut T, DequeError> {
        let head = self.chain.head().ok_or(DequeError::EmptyContainer)?;
        Ok(&mut self.arena.node_mut(head).value)
    }

    /// Returns the last element mutably.
    ///
    /// # Errors
    /// [`DequeError::EmptyContainer`] if the block is empty.
    pub fn back_mut(&mut self) -> Result<&mut T, DequeError> {
        let tail = self.chain.tail().ok_or(DequeError::EmptyContainer)?;
        Ok(&mut self.arena.node_mut(tail).value)
    }

    /// Inserts an element before the head.
    pub fn insert_head(&mut self, value: T) -> BlockPos {
        let idx = self.chain.push_front(&mut self.arena, value);
        self.pos(Some(idx))
    }

    /// Inserts an element after the tail.
    pub fn insert_tail(&mut self, value: T) -> BlockPos {
        let idx = self.chain.push_back(&mut self.arena, value);
        self.pos(Some(idx))
    }

    /// Removes the head element. Does nothing on an empty block.
    pub fn delete_head(&mut self) -> Option<T> {
        self.chain.pop_front(&mut self.arena)
    }

    /// Removes the tail element. Does nothing on an empty block.
    pub fn delete_tail(&mut self) -> Option<T> {
        self.chain.pop_back(&mut self.arena)
    }

    /// Returns the element at `index`, walking from the head.
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfBound`] if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, DequeError> {
        let idx = self
            .chain
            .nth(&self.arena, index)
            .ok_or(DequeError::IndexOutOfBound)?;
        Ok(&self.arena.node(idx).value)
    }

    /// Mutable counterpart of [`at`](Self::at).
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfBound`] if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, DequeError> {
        let idx = self
            .chain
            .nth(&self.arena, index)
            .ok_or(DequeError::IndexOutOfBound)?;
        Ok(&mut self.arena.node_mut(idx).value)
    }

    /// Returns the position of the head, or the end if empty.
    pub fn begin(&self) -> BlockPos {
        self.pos(self.chain.head())
    }

    /// Returns the sentinel position.
    pub fn end(&self) -> BlockPos {
        BlockPos::End(self.id)
    }

    /// Inserts `value` before `pos` and returns the position of the new node.
    ///
    /// Inserting at [`end`](Self::end) appends.
    ///
    /// # Errors
    /// [`DequeError::InvalidIterator`] if `pos` is null, comes from another
    /// block, or its node was removed.
    pub fn insert(&mut self, pos: BlockPos, value: T) -> Result<BlockPos, DequeError> {
        match self.resolve(pos)? {
            Some(at) => {
                let idx = self.chain.insert_before(&mut self.arena, at, value);
                Ok(self.pos(Some(idx)))
            }
            None => Ok(self.insert_tail(value)),
        }
    }

    /// Removes the node at `pos` and returns the position that followed it.
    ///
    /// # Errors
    /// [`DequeError::InvalidIterator`] if `pos` is null, the sentinel, foreign,
    /// or its node was removed.
    pub fn erase(&mut self, pos: BlockPos) -> Result<BlockPos, DequeError> {
        let at = self.resolve(pos)?.ok_or(DequeError::InvalidIterator)?;
        let next = self.arena.node(at).next;
        self.chain.remove(&mut self.arena, at);
        Ok(self.pos(next))
    }

    /// Returns the element at `pos`.
    ///
    /// # Errors
    /// [`DequeError::InvalidIterator`] if `pos` does not name a live node.
    pub fn get(&self, pos: BlockPos) -> Result<&T, DequeError> {
        let at = self.resolve(pos)?.ok_or(DequeError::InvalidIterator)?;
        Ok(&self.arena.node(at).value)
    }

    /// Returns the element at `pos` mutably.
    ///
    /// # Errors
    /// [`DequeError::InvalidIterator`] if `pos` does not name a live node.
    pub fn get_mut(&mut self, pos: BlockPos) -> Result<&mut T, DequeError> {
        let at = self.resolve(pos)?.ok_or(DequeError::InvalidIterator)?;
        Ok(&mut self.arena.node_mut(at).value)
    }

    /// Steps forward. The last node steps to the sentinel.
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfBound`] past the sentinel,
    /// [`DequeError::InvalidIterator`] for a null or removed position.
    pub fn next(&self, pos: BlockPos) -> Result<BlockPos, DequeError> {
        let at = self.resolve(pos)?.ok_or(DequeError::IndexOutOfBound)?;
        Ok(self.pos(self.arena.node(at).next))
    }

    /// Steps backward. The sentinel steps to the last node.
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfBound`] before the head,
    /// [`DequeError::InvalidIterator`] for a null or removed position.
    pub fn prev(&self, pos: BlockPos) -> Result<BlockPos, DequeError> {
        let prev = match self.resolve(pos)? {
            Some(at) => self.arena.node(at).prev,
            None => self.chain.tail(),
        };
        prev.map(|idx| self.pos(Some(idx)))
            .ok_or(DequeError::IndexOutOfBound)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.chain.clear(&mut self.arena);
    }

    /// Iterates the elements from head to tail.
    pub fn iter(&self) -> BlockIter<'_, T> {
        BlockIter {
            arena: &self.arena,
            slots: self.chain.slots(&self.arena),
        }
    }

    /// `Ok(None)` means the sentinel.
    fn resolve(&self, pos: BlockPos) -> Result<Option<usize>, DequeError> {
        match pos {
            BlockPos::End(owner) if owner == self.id => Ok(None),
            BlockPos::At(owner, handle) if owner == self.id => self
                .arena
                .resolve(handle)
                .map(Some)
                .ok_or(DequeError::InvalidIterator),
            _ => Err(DequeError::InvalidIterator),
        }
    }

    fn pos(&self, slot: Option<usize>) -> BlockPos {
        slot.map_or(BlockPos::End(self.id), |idx| {
            BlockPos::At(self.id, self.arena.handle(idx))
        })
    }
}

// Slot-level access used when a block serves as the deque's outer index.
impl<T> Block<T> {
    pub(crate) fn head_slot(&self) -> Option<usize> {
        self.chain.head()
    }

    pub(crate) fn tail_slot(&self) -> Option<usize> {
        self.chain.tail()
    }

    pub(crate) fn next_slot(&self, slot: usize) -> Option<usize> {
        self.arena.node(slot).next
    }

    pub(crate) fn prev_slot(&self, slot: usize) -> Option<usize> {
        self.arena.node(slot).prev
    }

    pub(crate) fn value(&self, slot: usize) -> &T {
        &self.arena.node(slot).value
    }

    pub(crate) fn value_mut(&mut self, slot: usize) -> &mut T {
        &mut self.arena.node_mut(slot).value
    }

    pub(crate) fn push_back_slot(&mut self, value: T) -> usize {
        self.chain.push_back(&mut self.arena, value)
    }

    pub(crate) fn insert_before_slot(&mut self, slot: usize, value: T) -> usize {
        self.chain.insert_before(&mut self.arena, slot, value)
    }

    pub(crate) fn remove_slot(&mut self, slot: usize) -> T {
        self.chain.remove(&mut self.arena, slot)
    }

    pub(crate) fn slots(&self) -> Slots<'_, T> {
        self.chain.slots(&self.arena)
    }
}

/// Deep copy with a fresh identity: positions of the original are foreign
/// to the copy.
impl<T: Clone> Clone for Block<T> {
    fn clone(&self) -> Self {
        Self {
            id: ContainerId::fresh(),
            arena: self.arena.clone(),
            chain: self.chain,
        }
    }
}

impl<T> Default for Block<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Block<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut block = Self::new();
        block.extend(iter);
        block
    }
}

impl<T> Extend<T> for Block<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert_tail(value);
        }
    }
}

impl<T: PartialEq> PartialEq for Block<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Block<T> {}

impl<T: fmt::Debug> fmt::Debug for Block<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over the elements of a [`Block`].
pub struct BlockIter<'a, T> {
    arena: &'a Arena<T>,
    slots: Slots<'a, T>,
}

impl<'a, T> Iterator for BlockIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let arena = self.arena;
        self.slots.next().map(|idx| &arena.node(idx).value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl<T> ExactSizeIterator for BlockIter<'_, T> {}

impl<'a, T> IntoIterator for &'a Block<T> {
    type Item = &'a T;
    type IntoIter = BlockIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
