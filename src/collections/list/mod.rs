//! Arena-backed doubly linked sequences.
//!
//! - `arena`: generational node storage
//! - `chain`: head/tail/len view over an arena
//! - `block`: an owned sequence built from one arena and one chain

mod arena;
mod block;
mod chain;

pub use arena::{ContainerId, NodeRef};
pub use block::{Block, BlockIter, BlockPos};
pub(crate) use arena::{Arena, RawNodes};
pub(crate) use chain::Chain;
