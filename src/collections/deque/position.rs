//! Positions and the arithmetic between them.
//!
//! A [`Position`] is a detached, `Copy` handle: it names one element node (or
//! the end) of one deque and is interpreted by passing it back to that deque.
//! Logical offsets are computed by summing block lengths in the outer index,
//! so jumps cost O(blocks + block size) instead of O(n) single steps.

use super::Deque;
use crate::collections::list::{Chain, ContainerId, NodeRef};
use crate::DequeError;

/// A location in a [`Deque`]: an element, or one past the last element.
///
/// Two positions are equal iff they come from the same deque and name the
/// same node. A block boundary has no position of its own: the tail of one
/// block and the head of the next are distinct elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) owner: ContainerId,
    pub(crate) node: Option<NodeRef>,
}

impl Position {
    /// Returns `true` for the one-past-the-end position.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }
}

impl<T> Deque<T> {
    /// Returns the element at `pos`.
    ///
    /// # Errors
    /// [`DequeError::InvalidIterator`] if `pos` is the end, belongs to
    /// another deque, or names a removed element.
    pub fn get(&self, pos: Position) -> Result<&T, DequeError> {
        let slot = self.resolve(pos)?.ok_or(DequeError::InvalidIterator)?;
        Ok(self.value(slot))
    }

    /// Returns the element at `pos` mutably.
    ///
    /// # Errors
    /// Same as [`get`](Self::get).
    pub fn get_mut(&mut self, pos: Position) -> Result<&mut T, DequeError> {
        let slot = self.resolve(pos)?.ok_or(DequeError::InvalidIterator)?;
        Ok(&mut self.nodes.node_mut(slot).value)
    }

    /// Returns the 0-based logical index of `pos`; the end maps to `len()`.
    ///
    /// Walks back to the head of the element's block, then sums the lengths
    /// of every preceding block.
    ///
    /// # Errors
    /// [`DequeError::InvalidIterator`] if `pos` is foreign or stale.
    pub fn offset_of(&self, pos: Position) -> Result<usize, DequeError> {
        let Some(slot) = self.resolve(pos)? else {
            return Ok(self.len);
        };
        let mut offset = Chain::offset_of(&self.nodes, slot);
        let mut block = self.index.prev_slot(self.nodes.node(slot).owner);
        while let Some(prev) = block {
            offset += self.index.value(prev).len();
            block = self.index.prev_slot(prev);
        }
        Ok(offset)
    }

    /// Returns the position of logical `index`; `len()` maps to the end.
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfBound`] if `index > len()`.
    pub fn seek(&self, index: usize) -> Result<Position, DequeError> {
        if index == self.len {
            return Ok(self.end());
        }
        let slot = self.locate(index).ok_or(DequeError::IndexOutOfBound)?;
        Ok(self.position(Some(slot)))
    }

    /// Returns the position `n` elements after `pos` (before, if negative).
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfBound`] if the result falls outside
    /// `[0, len()]`; [`DequeError::InvalidIterator`] if `pos` is foreign or
    /// stale.
    pub fn advance(&self, pos: Position, n: isize) -> Result<Position, DequeError> {
        let from = self.offset_of(pos)?;
        let target = from
            .checked_add_signed(n)
            .filter(|&target| target <= self.len)
            .ok_or(DequeError::IndexOutOfBound)?;
        self.seek(target)
    }

    /// Returns the number of forward steps from `from` to `to` (negative if
    /// `to` comes first).
    ///
    /// # Errors
    /// [`DequeError::CrossContainerIterator`] if the positions come from
    /// different deques; [`DequeError::InvalidIterator`] if they are stale or
    /// not from this deque.
    #[allow(clippy::cast_possible_wrap)]
    pub fn distance(&self, from: Position, to: Position) -> Result<isize, DequeError> {
        if from.owner != to.owner {
            return Err(DequeError::CrossContainerIterator);
        }
        let from = self.offset_of(from)?;
        let to = self.offset_of(to)?;
        // Offsets never exceed the arena length, which fits in `isize`.
        Ok(to as isize - from as isize)
    }

    /// Returns the position after `pos`, crossing block boundaries.
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfBound`] if `pos` is the end;
    /// [`DequeError::InvalidIterator`] if `pos` is foreign or stale.
    pub fn next(&self, pos: Position) -> Result<Position, DequeError> {
        let slot = self.resolve(pos)?.ok_or(DequeError::IndexOutOfBound)?;
        Ok(self.position(self.successor(slot)))
    }

    /// Returns the position before `pos`, crossing block boundaries. The end
    /// steps back to the last element.
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfBound`] if `pos` is the first element or the
    /// deque is empty; [`DequeError::InvalidIterator`] if `pos` is foreign or
    /// stale.
    pub fn prev(&self, pos: Position) -> Result<Position, DequeError> {
        let prev = match self.resolve(pos)? {
            Some(slot) => self.predecessor(slot),
            None => self.first_and_last().1,
        };
        prev.map(|slot| self.position(Some(slot)))
            .ok_or(DequeError::IndexOutOfBound)
    }

    pub(crate) fn position(&self, slot: Option<usize>) -> Position {
        Position {
            owner: self.id,
            node: slot.map(|slot| self.nodes.handle(slot)),
        }
    }

    /// Maps a position to its node slot; `Ok(None)` is the end.
    pub(crate) fn resolve(&self, pos: Position) -> Result<Option<usize>, DequeError> {
        if pos.owner != self.id {
            return Err(DequeError::InvalidIterator);
        }
        match pos.node {
            None => Ok(None),
            Some(handle) => self
                .nodes
                .resolve(handle)
                .map(Some)
                .ok_or(DequeError::InvalidIterator),
        }
    }
}
