//! Typed container errors.

use thiserror::Error;

/// Failure raised by a capacity-bounded container.
///
/// Both variants are deterministic: they depend only on the sizes chosen at
/// construction and the sequence of operations, never on allocator state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    /// The container already holds `capacity` elements.
    #[error("capacity of {capacity} elements exceeded")]
    CapacityExceeded { capacity: usize },
    /// A hash set was asked for more buckets than elements, or for none.
    #[error("invalid hash set geometry: {bucket_count} buckets for {max_elements} elements")]
    InvalidGeometry {
        bucket_count: usize,
        max_elements: usize,
    },
}
