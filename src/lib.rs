//! # `unrolled-deque` - Chunked Double-Ended Queue
//!
//! A double-ended queue stored as a doubly linked list of doubly linked
//! blocks. Each block holds about `sqrt(n)` elements, so end operations stay
//! O(1) while indexed access and position arithmetic cost O(sqrt n) instead
//! of O(n).
//!
//! ## Architecture
//!
//! 1. **Block** (`Block<T>`):
//!    - Arena-backed doubly linked sequence
//!    - O(1) head and tail operations, O(1) splice at a [`BlockPos`]
//!    - Also serves as the outer index of the deque
//!
//! 2. **Deque** (`Deque<T>`):
//!    - A `Block` of blocks with one shared node arena
//!    - Splits blocks at twice the target size and merges neighbours that fit
//!    - Per-instance sizing with hysteresis, tuned by [`DequeConfig`]
//!
//! 3. **Positions** ([`Position`], [`Cursor`]):
//!    - Detached, generation-checked handles to elements
//!    - Stable across splits and merges; invalidated only by removal
//!    - Offset, seek, advance and distance in O(sqrt n)
//!
//! ## Example
//!
//! ```rust
//! use unrolled_deque::{Deque, DequeError};
//!
//! let mut deque: Deque<i32> = (1..=5).collect();
//! assert_eq!(deque.pop_front(), Ok(1));
//!
//! let third = deque.seek(2).unwrap();
//! assert_eq!(deque.get(third), Ok(&4));
//! assert_eq!(deque.distance(deque.begin(), third), Ok(2));
//!
//! deque.clear();
//! assert_eq!(deque.front(), Err(DequeError::EmptyContainer));
//! ```
//!
//! ## Features
//!
//! - `tracing`: emits `trace`-level events for block splits and merges, and
//!   `debug`-level events when the sizing target is refreshed.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod collections;
mod config;
mod error;

pub use collections::{
    Block, BlockIter, BlockPos, ContainerId, Cursor, Deque, IntoIter, Iter, IterMut, NodeRef, Position,
};
pub use config::{DequeConfig, DEFAULT_HYSTERESIS, DEFAULT_MIN_BLOCK_SIZE};
pub use error::DequeError;

// Compile-time assertions for handle layout
const _: () = {
    use core::mem;

    // A block position is a tagged (owner, node) pair.
    assert!(mem::size_of::<BlockPos>() <= 4 * mem::size_of::<u64>());

    // Errors carry at most a static reason.
    assert!(mem::size_of::<DequeError>() <= 3 * mem::size_of::<usize>());

    // Positions stay small enough to pass by value.
    assert!(mem::size_of::<Position>() <= 4 * mem::size_of::<u64>());
};
