//! Capacity-bounded containers used by the search layer.
//!
//! Every container is sized at construction. Running out of room is a
//! [`crate::error::CollectionError::CapacityExceeded`] the caller can catch,
//! never a silent reallocation. The one exception is
//! [`ChainedHashSet`] growth, which only redistributes buckets and never
//! raises the element cap.

pub mod chain;
pub mod hash_set;
pub mod heap;
pub mod stack;

pub use chain::Chain;
pub use hash_set::{ChainedHashSet, DEFAULT_HASH_CAPACITY};
pub use heap::{FixedCapacityHeap, HeapOrder, MaxFirst, MaxHeap, MinFirst, MinHeap, DEFAULT_HEAP_CAPACITY};
pub use stack::BoundedStack;
