//! Singly-linked chain with O(1) append.
//!
//! Links are indices into a slot vector rather than boxed pointers, so the
//! chain needs no `unsafe` for its tail pointer and removal can recycle
//! slots. Iteration follows the link order (insertion order, minus removed
//! elements), never slot order.
//!
//! Used as the bucket type of [`super::hash_set::ChainedHashSet`] and as a
//! growable result collector.

use std::fmt;

enum Slot<T> {
    Occupied { value: T, next: Option<usize> },
    Vacant { next_free: Option<usize> },
}

/// Append-only/removable singly-linked sequence.
pub struct Chain<T> {
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    free: Option<usize>,
    len: usize,
}

impl<T> Chain<T> {
    /// Create an empty chain. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: None,
            tail: None,
            free: None,
            len: 0,
        }
    }

    /// Number of elements in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append `value` after the current tail.
    pub fn push_back(&mut self, value: T) {
        let link = Slot::Occupied { value, next: None };
        let index = match self.free {
            Some(index) => {
                if let Slot::Vacant { next_free } = self.slots[index] {
                    self.free = next_free;
                }
                self.slots[index] = link;
                index
            }
            None => {
                self.slots.push(link);
                self.slots.len() - 1
            }
        };
        match self.tail {
            Some(tail) => {
                if let Slot::Occupied { next, .. } = &mut self.slots[tail] {
                    *next = Some(index);
                }
            }
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
    }

    /// First element in link order, if any.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|i| self.value_at(i))
    }

    /// First element satisfying `pred`.
    pub fn find<F>(&self, mut pred: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|value| pred(value))
    }

    /// Mutable access to the first element satisfying `pred`.
    pub fn find_mut<F>(&mut self, mut pred: F) -> Option<&mut T>
    where
        F: FnMut(&T) -> bool,
    {
        let index = self.position(&mut pred)?.0;
        match &mut self.slots[index] {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// Returns `true` if any element satisfies `pred`.
    pub fn contains<F>(&self, pred: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.find(pred).is_some()
    }

    /// Unlink and return the first element satisfying `pred`.
    ///
    /// Returns `None` (and leaves the chain untouched) when nothing matches.
    pub fn remove_first<F>(&mut self, mut pred: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let (index, previous) = self.position(&mut pred)?;
        let vacant = Slot::Vacant {
            next_free: self.free,
        };
        let Slot::Occupied { value, next } = std::mem::replace(&mut self.slots[index], vacant)
        else {
            return None;
        };
        match previous {
            Some(prev) => {
                if let Slot::Occupied { next: prev_next, .. } = &mut self.slots[prev] {
                    *prev_next = next;
                }
            }
            None => self.head = next,
        }
        if self.tail == Some(index) {
            self.tail = previous;
        }
        self.free = Some(index);
        self.len -= 1;
        Some(value)
    }

    /// Drop every element and release slot storage.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.tail = None;
        self.free = None;
        self.len = 0;
    }

    /// Iterate in link order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            chain: self,
            cursor: self.head,
        }
    }

    /// Move every element, in link order, to the end of `out`.
    ///
    /// Allocates only if `out` lacks room for `len()` more elements.
    pub fn drain_into(&mut self, out: &mut Vec<T>) {
        out.reserve(self.len);
        let mut cursor = self.head;
        while let Some(index) = cursor {
            match std::mem::replace(&mut self.slots[index], Slot::Vacant { next_free: None }) {
                Slot::Occupied { value, next } => {
                    out.push(value);
                    cursor = next;
                }
                Slot::Vacant { .. } => break,
            }
        }
        self.clear();
    }

    /// Consume the chain into a vector in link order.
    #[must_use]
    pub fn into_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        self.drain_into(&mut out);
        out
    }

    fn value_at(&self, index: usize) -> Option<&T> {
        match &self.slots[index] {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// `(index, previous_index)` of the first element satisfying `pred`.
    fn position<F>(&self, pred: &mut F) -> Option<(usize, Option<usize>)>
    where
        F: FnMut(&T) -> bool,
    {
        let mut previous = None;
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let Slot::Occupied { value, next } = &self.slots[index] else {
                return None;
            };
            if pred(value) {
                return Some((index, previous));
            }
            previous = Some(index);
            cursor = *next;
        }
        None
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Link-order iterator over a [`Chain`].
pub struct Iter<'a, T> {
    chain: &'a Chain<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        match &self.chain.slots[index] {
            Slot::Occupied { value, next } => {
                self.cursor = *next;
                Some(value)
            }
            Slot::Vacant { .. } => {
                self.cursor = None;
                None
            }
        }
    }
}

impl<'a, T> IntoIterator for &'a Chain<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for Chain<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut chain = Self::new();
        for value in iter {
            chain.push_back(value);
        }
        chain
    }
}
