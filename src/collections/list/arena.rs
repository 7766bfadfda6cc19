//! Generational node storage for linked chains.
//!
//! Nodes are addressed by slot index, so links are plain `Option<usize>` and
//! ownership stays with the arena: dropping it drops every node without a
//! manual traversal. Freed slots are threaded onto a free list for reuse, and
//! every free bumps the slot generation so a stale [`NodeRef`] never resolves
//! to the node that later reuses its slot.

use core::marker::PhantomData;
use core::ptr::NonNull;
use core::sync::atomic::{AtomicU64, Ordering};

/// Identity of a container instance, carried by every position it hands out.
///
/// Only compared for equality; a freshly created or cloned container always
/// gets a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(u64);

impl ContainerId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A generation-checked handle to a node slot.
///
/// Generations are 64-bit, so a slot never cycles back to a generation an
/// outstanding handle still holds.
///
/// Equality is node identity: two handles are equal only if they name the
/// same slot in the same generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    index: usize,
    generation: u64,
}

/// A linked node. `owner` tags the chain the node currently belongs to.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
    pub(crate) owner: usize,
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied(Node<T>),
    Free(Option<usize>), // Next free slot index
}

#[derive(Debug, Clone)]
struct Entry<T> {
    generation: u64,
    slot: Slot<T>,
}

/// Slot storage for the nodes of one or more chains.
#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    entries: Vec<Entry<T>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Stores an unlinked node and returns its slot index.
    pub(crate) fn alloc(&mut self, value: T, owner: usize) -> usize {
        let node = Node {
            value,
            prev: None,
            next: None,
            owner,
        };
        self.len += 1;

        if let Some(free_idx) = self.free_head {
            let entry = &mut self.entries[free_idx];
            self.free_head = match entry.slot {
                Slot::Free(next) => next,
                Slot::Occupied(_) => panic!("Corrupted free list"),
            };
            entry.slot = Slot::Occupied(node);
            free_idx
        } else {
            self.entries.push(Entry {
                generation: 0,
                slot: Slot::Occupied(node),
            });
            self.entries.len() - 1
        }
    }

    /// Releases a slot and returns its value.
    ///
    /// The caller must have unlinked the node from its chain.
    pub(crate) fn free(&mut self, idx: usize) -> T {
        let entry = &mut self.entries[idx];
        let slot = core::mem::replace(&mut entry.slot, Slot::Free(self.free_head));
        match slot {
            Slot::Occupied(node) => {
                entry.generation += 1;
                self.free_head = Some(idx);
                self.len -= 1;
                node.value
            }
            Slot::Free(_) => panic!("Double free of slot {idx}"),
        }
    }

    pub(crate) fn node(&self, idx: usize) -> &Node<T> {
        match &self.entries[idx].slot {
            Slot::Occupied(node) => node,
            Slot::Free(_) => panic!("Corrupted chain: link to free slot {idx}"),
        }
    }

    pub(crate) fn node_mut(&mut self, idx: usize) -> &mut Node<T> {
        match &mut self.entries[idx].slot {
            Slot::Occupied(node) => node,
            Slot::Free(_) => panic!("Corrupted chain: link to free slot {idx}"),
        }
    }

    /// Returns the handle of an occupied slot.
    pub(crate) fn handle(&self, idx: usize) -> NodeRef {
        NodeRef {
            index: idx,
            generation: self.entries[idx].generation,
        }
    }

    /// Maps a handle back to its slot index if the node is still alive.
    pub(crate) fn resolve(&self, handle: NodeRef) -> Option<usize> {
        let entry = self.entries.get(handle.index)?;
        match entry.slot {
            Slot::Occupied(_) if entry.generation == handle.generation => Some(handle.index),
            _ => None,
        }
    }

    /// Frees every slot, invalidating all outstanding handles.
    pub(crate) fn clear(&mut self) {
        let mut free_head = None;
        for (idx, entry) in self.entries.iter_mut().enumerate().rev() {
            if matches!(entry.slot, Slot::Occupied(_)) {
                entry.generation += 1;
            }
            entry.slot = Slot::Free(free_head);
            free_head = Some(idx);
        }
        self.free_head = free_head;
        self.len = 0;
    }

    /// Splits the borrow so disjoint nodes can be handed out mutably.
    pub(crate) fn raw_nodes(&mut self) -> RawNodes<'_, T> {
        RawNodes {
            len: self.entries.len(),
            // SAFETY: `Vec::as_mut_ptr` is never null.
            base: unsafe { NonNull::new_unchecked(self.entries.as_mut_ptr()) },
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A mutable view of an arena that yields nodes one slot at a time.
pub(crate) struct RawNodes<'a, T> {
    base: NonNull<Entry<T>>,
    len: usize,
    _marker: PhantomData<&'a mut Entry<T>>,
}

impl<'a, T> RawNodes<'a, T> {
    /// Returns the node stored at `idx`.
    ///
    /// # Safety
    /// `idx` must name an occupied slot, and no slot may be requested twice
    /// while a previously returned reference for it is alive.
    pub(crate) unsafe fn node(&self, idx: usize) -> &'a mut Node<T> {
        assert!(idx < self.len, "slot {idx} out of range");
        // SAFETY: in bounds, and the caller guarantees exclusive access to this slot.
        let entry = unsafe { &mut *self.base.as_ptr().add(idx) };
        match &mut entry.slot {
            Slot::Occupied(node) => node,
            Slot::Free(_) => panic!("Corrupted chain: link to free slot {idx}"),
        }
    }
}

// SAFETY: `RawNodes` is a split `&mut Arena<T>`.
unsafe impl<T: Send> Send for RawNodes<'_, T> {}
// SAFETY: shared access to `RawNodes` hands out nothing without `unsafe`.
unsafe impl<T: Sync> Sync for RawNodes<'_, T> {}
