//! `Chain`: a doubly linked run of arena nodes.
//!
//! A chain only stores its endpoints and length; the nodes themselves live in
//! an [`Arena`] that may be shared by many chains. This is the one sequence
//! abstraction behind both a standalone [`Block`](super::Block) and every
//! block of a [`Deque`](crate::Deque). Every node records the `tag` of the
//! chain that holds it, and splicing retags the nodes it moves.

use super::arena::Arena;

/// Endpoints of a linked run of nodes within an arena.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Chain {
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    pub(crate) tag: usize,
}

impl Chain {
    pub(crate) const fn new(tag: usize) -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            tag,
        }
    }

    /// Number of nodes in the chain.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the chain holds no nodes.
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn head(&self) -> Option<usize> {
        self.head
    }

    pub(crate) fn tail(&self) -> Option<usize> {
        self.tail
    }

    pub(crate) fn push_front<T>(&mut self, arena: &mut Arena<T>, value: T) -> usize {
        let new_idx = arena.alloc(value, self.tag);
        let old_head = self.head;

        if let Some(head_idx) = old_head {
            arena.node_mut(head_idx).prev = Some(new_idx);
        } else {
            self.tail = Some(new_idx);
        }
        arena.node_mut(new_idx).next = old_head;

        self.head = Some(new_idx);
        self.len += 1;
        new_idx
    }

    pub(crate) fn push_back<T>(&mut self, arena: &mut Arena<T>, value: T) -> usize {
        let new_idx = arena.alloc(value, self.tag);
        let old_tail = self.tail;

        if let Some(tail_idx) = old_tail {
            arena.node_mut(tail_idx).next = Some(new_idx);
        } else {
            self.head = Some(new_idx);
        }
        arena.node_mut(new_idx).prev = old_tail;

        self.tail = Some(new_idx);
        self.len += 1;
        new_idx
    }

    pub(crate) fn pop_front<T>(&mut self, arena: &mut Arena<T>) -> Option<T> {
        let head_idx = self.head?;
        Some(self.remove(arena, head_idx))
    }

    pub(crate) fn pop_back<T>(&mut self, arena: &mut Arena<T>) -> Option<T> {
        let tail_idx = self.tail?;
        Some(self.remove(arena, tail_idx))
    }

    /// Links a new node in front of `at`, which must belong to this chain.
    pub(crate) fn insert_before<T>(&mut self, arena: &mut Arena<T>, at: usize, value: T) -> usize {
        let new_idx = arena.alloc(value, self.tag);
        let prev_idx = arena.node(at).prev;

        {
            let node = arena.node_mut(new_idx);
            node.prev = prev_idx;
            node.next = Some(at);
        }
        arena.node_mut(at).prev = Some(new_idx);

        if let Some(prev) = prev_idx {
            arena.node_mut(prev).next = Some(new_idx);
        } else {
            self.head = Some(new_idx);
        }

        self.len += 1;
        new_idx
    }

    /// Unlinks and frees `at`, which must belong to this chain.
    pub(crate) fn remove<T>(&mut self, arena: &mut Arena<T>, at: usize) -> T {
        let (prev_idx, next_idx) = {
            let node = arena.node(at);
            (node.prev, node.next)
        };

        if let Some(prev) = prev_idx {
            arena.node_mut(prev).next = next_idx;
        } else {
            self.head = next_idx;
        }

        if let Some(next) = next_idx {
            arena.node_mut(next).prev = prev_idx;
        } else {
            self.tail = prev_idx;
        }

        self.len -= 1;
        arena.free(at)
    }

    /// Returns the slot of the `n`-th node, walking from the head.
    pub(crate) fn nth<T>(&self, arena: &Arena<T>, n: usize) -> Option<usize> {
        if n >= self.len {
            return None;
        }
        let mut current = self.head?;
        for _ in 0..n {
            current = arena.node(current).next?;
        }
        Some(current)
    }

    /// Returns the 0-based position of `at` by walking back to the head.
    pub(crate) fn offset_of<T>(arena: &Arena<T>, at: usize) -> usize {
        let mut steps = 0;
        let mut current = arena.node(at).prev;
        while let Some(idx) = current {
            steps += 1;
            current = arena.node(idx).prev;
        }
        steps
    }

    /// Detaches the first `count` nodes into a new chain tagged `tag`.
    ///
    /// Nodes keep their slots, so handles to them stay valid.
    pub(crate) fn split_front<T>(&mut self, arena: &mut Arena<T>, count: usize, tag: usize) -> Chain {
        let mut front = Chain::new(tag);
        if count == 0 {
            return front;
        }
        if count >= self.len {
            core::mem::swap(&mut front, self);
            self.tag = front.tag;
            front.tag = tag;
            front.retag(arena);
            return front;
        }

        let mut last = match self.head {
            Some(head) => head,
            None => return front,
        };
        arena.node_mut(last).owner = tag;
        for _ in 1..count {
            last = match arena.node(last).next {
                Some(next) => next,
                None => panic!("Corrupted chain: shorter than its length"),
            };
            arena.node_mut(last).owner = tag;
        }

        let rest = arena.node(last).next;
        arena.node_mut(last).next = None;
        if let Some(rest) = rest {
            arena.node_mut(rest).prev = None;
        }

        front.head = self.head;
        front.tail = Some(last);
        front.len = count;

        self.head = rest;
        self.len -= count;
        front
    }

    /// Moves every node of `other` in front of this chain's head.
    pub(crate) fn prepend<T>(&mut self, arena: &mut Arena<T>, mut other: Chain) {
        if other.is_empty() {
            return;
        }
        other.tag = self.tag;
        other.retag(arena);

        match (other.tail, self.head) {
            (Some(other_tail), Some(head)) => {
                arena.node_mut(other_tail).next = Some(head);
                arena.node_mut(head).prev = Some(other_tail);
            }
            _ => self.tail = other.tail,
        }
        self.head = other.head;
        self.len += other.len;
    }

    /// Moves every node of `other` after this chain's tail.
    pub(crate) fn append<T>(&mut self, arena: &mut Arena<T>, mut other: Chain) {
        if other.is_empty() {
            return;
        }
        other.tag = self.tag;
        other.retag(arena);

        match (self.tail, other.head) {
            (Some(tail), Some(other_head)) => {
                arena.node_mut(tail).next = Some(other_head);
                arena.node_mut(other_head).prev = Some(tail);
            }
            _ => self.head = other.head,
        }
        self.tail = other.tail;
        self.len += other.len;
    }

    /// Frees every node of the chain.
    pub(crate) fn clear<T>(&mut self, arena: &mut Arena<T>) {
        while self.pop_front(arena).is_some() {}
    }

    /// Iterates the node slots from head to tail.
    pub(crate) fn slots<'a, T>(&self, arena: &'a Arena<T>) -> Slots<'a, T> {
        Slots {
            arena,
            current: self.head,
            remaining: self.len,
        }
    }

    fn retag<T>(&self, arena: &mut Arena<T>) {
        let mut current = self.head;
        while let Some(idx) = current {
            let node = arena.node_mut(idx);
            node.owner = self.tag;
            current = node.next;
        }
    }
}

/// Iterator over the slot indices of a chain.
pub(crate) struct Slots<'a, T> {
    arena: &'a Arena<T>,
    current: Option<usize>,
    remaining: usize,
}

impl<T> Iterator for Slots<'_, T> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let idx = self.current?;
        self.current = self.arena.node(idx).next;
        self.remaining -= 1;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Slots<'_, T> {}
