//! `Cursor`: a read-only position bound to its deque.

use super::{Deque, Position};
use crate::DequeError;
use core::fmt;

/// A borrowed, read-only view of one position in a [`Deque`].
///
/// Offers the same navigation and arithmetic as the position methods on
/// `Deque`, without passing the deque around.
pub struct Cursor<'a, T> {
    deque: &'a Deque<T>,
    pos: Position,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(deque: &'a Deque<T>, pos: Position) -> Self {
        Self { deque, pos }
    }

    /// Returns the detached position.
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Returns `true` at one past the last element.
    pub fn is_end(&self) -> bool {
        self.pos.is_end()
    }

    /// Returns the element under the cursor.
    ///
    /// # Errors
    /// [`DequeError::InvalidIterator`] at the end or at a removed element.
    pub fn get(&self) -> Result<&'a T, DequeError> {
        self.deque.get(self.pos)
    }

    /// Returns the logical index of the cursor.
    ///
    /// # Errors
    /// [`DequeError::InvalidIterator`] if the position is stale.
    pub fn offset(&self) -> Result<usize, DequeError> {
        self.deque.offset_of(self.pos)
    }

    /// Steps forward.
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfBound`] at the end.
    pub fn move_next(&mut self) -> Result<(), DequeError> {
        self.pos = self.deque.next(self.pos)?;
        Ok(())
    }

    /// Steps backward.
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfBound`] at the first element.
    pub fn move_prev(&mut self) -> Result<(), DequeError> {
        self.pos = self.deque.prev(self.pos)?;
        Ok(())
    }

    /// Returns a cursor `n` elements away.
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfBound`] outside `[0, len()]`.
    pub fn advance(&self, n: isize) -> Result<Self, DequeError> {
        let pos = self.deque.advance(self.pos, n)?;
        Ok(Self::new(self.deque, pos))
    }

    /// Moves the cursor `n` elements in place.
    ///
    /// # Errors
    /// [`DequeError::IndexOutOfBound`] outside `[0, len()]`; the cursor is
    /// left where it was.
    pub fn advance_by(&mut self, n: isize) -> Result<(), DequeError> {
        self.pos = self.deque.advance(self.pos, n)?;
        Ok(())
    }

    /// Returns `self - origin`: the forward steps from `origin` to `self`.
    ///
    /// # Errors
    /// [`DequeError::CrossContainerIterator`] if the cursors view different
    /// deques.
    pub fn offset_from(&self, origin: &Cursor<'_, T>) -> Result<isize, DequeError> {
        self.deque.distance(origin.pos, self.pos)
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialEq<Position> for Cursor<'_, T> {
    fn eq(&self, other: &Position) -> bool {
        self.pos == *other
    }
}

impl<T> From<Cursor<'_, T>> for Position {
    fn from(cursor: Cursor<'_, T>) -> Self {
        cursor.pos
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("pos", &self.pos).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Deque, DequeConfig, DequeError};

    #[test]
    fn test_cursor_walk() {
        let mut deque = Deque::with_config(DequeConfig::new().with_min_block_size(2)).unwrap();
        deque.extend(1..=6);

        let mut cursor = deque.cbegin();
        let mut seen = Vec::new();
        while !cursor.is_end() {
            seen.push(*cursor.get().unwrap());
            cursor.move_next().unwrap();
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(cursor, deque.cend());
        assert_eq!(cursor.move_next(), Err(DequeError::IndexOutOfBound));
        assert_eq!(cursor.get(), Err(DequeError::InvalidIterator));

        cursor.move_prev().unwrap();
        assert_eq!(cursor.get(), Ok(&6));
    }

    #[test]
    fn test_cursor_arithmetic() {
        let deque: Deque<i32> = (0..100).collect();
        let begin = deque.cbegin();
        let later = begin.advance(42).unwrap();
        assert_eq!(later.get(), Ok(&42));
        assert_eq!(later.offset(), Ok(42));
        assert_eq!(later.offset_from(&begin), Ok(42));
        assert_eq!(begin.offset_from(&later), Ok(-42));
        assert_eq!(later.advance(-42).unwrap(), begin);

        let mut moving = begin;
        assert_eq!(moving.advance_by(101), Err(DequeError::IndexOutOfBound));
        assert_eq!(moving, begin);
        moving.advance_by(100).unwrap();
        assert!(moving.is_end());
    }

    #[test]
    fn test_cursor_cross_container() {
        let left: Deque<i32> = (0..3).collect();
        let right: Deque<i32> = (0..3).collect();
        assert_eq!(
            left.cbegin().offset_from(&right.cbegin()),
            Err(DequeError::CrossContainerIterator)
        );
        assert_ne!(left.cend().position(), right.cend().position());
    }
}
