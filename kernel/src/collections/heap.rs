//! Fixed-capacity binary heap.
//!
//! Storage is preallocated at construction and never grows: inserting into
//! a full heap is [`CollectionError::CapacityExceeded`], not a silent
//! reallocation. Positions are 1-based (`children(i) = 2i, 2i+1`,
//! `parent(i) = i/2`); position `i` lives at `items[i - 1]`.
//!
//! There is no decrease-key. Callers that need to improve an element's
//! priority push a second copy and discard the stale one when it surfaces.

use std::fmt;
use std::marker::PhantomData;

use crate::error::CollectionError;

/// Default element capacity used across the workspace.
pub const DEFAULT_HEAP_CAPACITY: usize = 65_536;

/// Root ordering of a [`FixedCapacityHeap`].
pub trait HeapOrder {
    /// Returns `true` if `a` must sit strictly above `b`.
    fn precedes<T: Ord>(a: &T, b: &T) -> bool;
}

/// Smallest element at the root.
#[derive(Debug, Clone, Copy)]
pub struct MinFirst;

/// Largest element at the root.
#[derive(Debug, Clone, Copy)]
pub struct MaxFirst;

impl HeapOrder for MinFirst {
    fn precedes<T: Ord>(a: &T, b: &T) -> bool {
        a < b
    }
}

impl HeapOrder for MaxFirst {
    fn precedes<T: Ord>(a: &T, b: &T) -> bool {
        a > b
    }
}

/// Binary heap over `T` with a capacity fixed at construction.
pub struct FixedCapacityHeap<T, O> {
    items: Vec<T>,
    capacity: usize,
    _order: PhantomData<O>,
}

/// Min-ordered heap (A*, Greedy, BFS frontiers).
pub type MinHeap<T> = FixedCapacityHeap<T, MinFirst>;

/// Max-ordered heap (DFS sibling ordering, fitness sorting).
pub type MaxHeap<T> = FixedCapacityHeap<T, MaxFirst>;

impl<T: Ord, O: HeapOrder> FixedCapacityHeap<T, O> {
    /// Create an empty heap holding at most `capacity` elements.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            _order: PhantomData,
        }
    }

    /// Insert `item`, sifting it up past every parent it strictly precedes.
    ///
    /// # Errors
    ///
    /// [`CollectionError::CapacityExceeded`] if the heap is full. The heap
    /// is left unchanged.
    pub fn insert(&mut self, item: T) -> Result<(), CollectionError> {
        if self.items.len() >= self.capacity {
            return Err(CollectionError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.items.push(item);
        self.sift_up(self.items.len());
        Ok(())
    }

    /// The root element, without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Remove and return the root element.
    ///
    /// The last element is moved to the root and sifted down; when both
    /// children tie, the left child is preferred.
    pub fn extract(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let root = self.items.pop();
        self.sift_down(1);
        root
    }

    /// Number of elements currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of elements.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Drop every element; capacity is retained.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Elements in storage order (not priority order).
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Drain the heap in root-first order.
    #[must_use]
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.items.len());
        while let Some(item) = self.extract() {
            out.push(item);
        }
        out
    }

    /// Linear scan for an element equal to `item`.
    ///
    /// O(n). Only used on small heaps (crossover point selection).
    #[must_use]
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.iter().any(|existing| existing == item)
    }

    fn at(&self, pos: usize) -> &T {
        &self.items[pos - 1]
    }

    fn swap_positions(&mut self, a: usize, b: usize) {
        self.items.swap(a - 1, b - 1);
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 1 && O::precedes(self.at(pos), self.at(pos / 2)) {
            self.swap_positions(pos, pos / 2);
            pos /= 2;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let count = self.items.len();
        while pos * 2 <= count {
            let left = pos * 2;
            let right = left + 1;
            let child = if right <= count && O::precedes(self.at(right), self.at(left)) {
                right
            } else {
                left
            };
            if !O::precedes(self.at(child), self.at(pos)) {
                break;
            }
            self.swap_positions(pos, child);
            pos = child;
        }
    }
}

impl<T: Ord> FixedCapacityHeap<T, MinFirst> {
    /// Smallest element, without removing it.
    #[must_use]
    pub fn peek_min(&self) -> Option<&T> {
        self.peek()
    }

    /// Remove and return the smallest element.
    pub fn extract_min(&mut self) -> Option<T> {
        self.extract()
    }
}

impl<T: Ord> FixedCapacityHeap<T, MaxFirst> {
    /// Largest element, without removing it.
    #[must_use]
    pub fn peek_max(&self) -> Option<&T> {
        self.peek()
    }

    /// Remove and return the largest element.
    pub fn extract_max(&mut self) -> Option<T> {
        self.extract()
    }
}

impl<T: Ord, O: HeapOrder> Default for FixedCapacityHeap<T, O> {
    fn default() -> Self {
        Self::new(DEFAULT_HEAP_CAPACITY)
    }
}

impl<T: fmt::Debug, O> fmt::Debug for FixedCapacityHeap<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedCapacityHeap")
            .field("len", &self.items.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
