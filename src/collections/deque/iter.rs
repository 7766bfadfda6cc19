use super::Deque;
use crate::collections::list::{Block, Chain, RawNodes};
use core::iter::FusedIterator;

/// Borrowing iterator over a [`Deque`], front to back.
pub struct Iter<'a, T> {
    deque: &'a Deque<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(deque: &'a Deque<T>) -> Self {
        let (front, back) = deque.first_and_last();
        Self {
            deque,
            front,
            back,
            remaining: deque.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.front?;
        self.remaining -= 1;
        self.front = self.deque.successor(slot);
        Some(self.deque.value(slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.back?;
        self.remaining -= 1;
        self.back = self.deque.predecessor(slot);
        Some(self.deque.value(slot))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            deque: self.deque,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Mutable iterator over a [`Deque`], front to back.
pub struct IterMut<'a, T> {
    nodes: RawNodes<'a, T>,
    index: &'a Block<Chain>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(
        nodes: RawNodes<'a, T>,
        index: &'a Block<Chain>,
        front: Option<usize>,
        back: Option<usize>,
        remaining: usize,
    ) -> Self {
        Self {
            nodes,
            index,
            front,
            back,
            remaining,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.front?;
        self.remaining -= 1;
        // SAFETY: `remaining` stops both ends before they meet, so each slot
        // is handed out once.
        let node = unsafe { self.nodes.node(slot) };
        let index = self.index;
        self.front = node
            .next
            .or_else(|| index.next_slot(node.owner).and_then(|block| index.value(block).head()));
        Some(&mut node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.back?;
        self.remaining -= 1;
        // SAFETY: see `next`.
        let node = unsafe { self.nodes.node(slot) };
        let index = self.index;
        self.back = node
            .prev
            .or_else(|| index.prev_slot(node.owner).and_then(|block| index.value(block).tail()));
        Some(&mut node.value)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over a [`Deque`], front to back.
pub struct IntoIter<T> {
    deque: Deque<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.deque.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { deque: self }
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Deque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Deque, DequeConfig};

    fn spread(n: i32) -> Deque<i32> {
        let mut deque = Deque::with_config(DequeConfig::new().with_min_block_size(2)).unwrap();
        deque.extend(0..n);
        deque
    }

    #[test]
    fn test_iter_both_ends() {
        let deque = spread(9);
        assert!(deque.block_count() > 1);
        let mut iter = deque.iter();
        assert_eq!(iter.len(), 9);
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&8));
        assert_eq!(iter.len(), 7);
        let middle: Vec<_> = iter.copied().collect();
        assert_eq!(middle, vec![1, 2, 3, 4, 5, 6, 7]);

        let reversed: Vec<_> = deque.iter().rev().copied().collect();
        assert_eq!(reversed, (0..9).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_iter_meets_in_the_middle() {
        let deque = spread(5);
        let mut iter = deque.iter();
        let mut seen = Vec::new();
        loop {
            match (iter.next(), iter.next_back()) {
                (Some(a), Some(b)) => seen.extend([*a, *b]),
                (Some(a), None) => seen.push(*a),
                _ => break,
            }
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_iter_mut_across_blocks() {
        let mut deque = spread(11);
        for value in deque.iter_mut() {
            *value *= 10;
        }
        if let Some(last) = deque.iter_mut().next_back() {
            *last = -1;
        }
        assert_eq!(deque.at(3), Ok(&30));
        assert_eq!(deque.back(), Ok(&-1));
        assert!(deque.validate().is_ok());

        for value in &mut deque {
            *value += 1;
        }
        assert_eq!(deque.front(), Ok(&1));
    }

    #[test]
    fn test_into_iter_drains() {
        let deque = spread(6);
        let mut iter = deque.into_iter();
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next_back(), Some(5));
        assert_eq!(iter.collect::<Vec<_>>(), vec![1, 2, 3, 4]);

        let owned: Deque<String> = ["x", "y"].iter().map(|s| s.to_string()).collect();
        let joined: String = owned.into_iter().collect();
        assert_eq!(joined, "xy");
    }

    #[test]
    fn test_empty_iterators() {
        let mut deque: Deque<i32> = Deque::new();
        assert_eq!(deque.iter().next(), None);
        assert_eq!(deque.iter_mut().next_back(), None);
        assert_eq!(deque.into_iter().next(), None);
    }
}
