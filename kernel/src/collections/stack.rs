//! Bounded LIFO stack.
//!
//! `push` past capacity is an error; `pop` and `peek` on an empty stack
//! return `None`. Depth-first search detects exhaustion through
//! [`BoundedStack::is_empty`], never through an error.

use crate::error::CollectionError;

#[derive(Debug, Clone)]
pub struct BoundedStack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    /// Create an empty stack holding at most `capacity` elements.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// # Errors
    ///
    /// [`CollectionError::CapacityExceeded`] if the stack is full.
    pub fn push(&mut self, item: T) -> Result<(), CollectionError> {
        if self.items.len() >= self.capacity {
            return Err(CollectionError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
