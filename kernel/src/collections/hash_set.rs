//! Separate-chaining hash set with a hard element cap.
//!
//! Bucket index is `hash % bucket_count`. Each bucket is a [`Chain`]; an
//! element's stable hash is stored next to it so the table can be rehashed
//! without asking the element again, and so that callers whose elements
//! cannot compare themselves (closed-set entries pointing into a node
//! arena) can use the `*_by` methods with an explicit hash and predicate.
//!
//! # Growth
//!
//! When growth is enabled, the bucket count doubles once
//! `count > bucket_count * 2` and the doubled count still fits in
//! `max_elements`. The new bucket table and the staging vector for the
//! rehash are both reserved before any element moves; if either
//! reservation fails, growth is switched off for the rest of the set's life
//! and the old table stays in use untouched. Slot storage allocated while
//! relinking elements into the new buckets is not covered by this.

use std::collections::TryReserveError;
use std::fmt;

use log::{debug, warn};

use crate::capability::{Equatable, Hashable};
use crate::collections::chain::Chain;
use crate::error::CollectionError;

/// Default bucket count and element cap.
pub const DEFAULT_HASH_CAPACITY: usize = 65_536;

struct Entry<T> {
    hash: u32,
    value: T,
}

/// Hash set bounded to `max_elements`, chaining collisions per bucket.
pub struct ChainedHashSet<T> {
    buckets: Vec<Chain<Entry<T>>>,
    max_elements: usize,
    count: usize,
    grow: bool,
}

impl<T> ChainedHashSet<T> {
    /// Create an empty set with `bucket_count` buckets holding at most
    /// `max_elements` elements. Growth starts disabled.
    ///
    /// # Errors
    ///
    /// [`CollectionError::InvalidGeometry`] if `bucket_count` is zero or
    /// larger than `max_elements`.
    pub fn new(bucket_count: usize, max_elements: usize) -> Result<Self, CollectionError> {
        if bucket_count == 0 || bucket_count > max_elements {
            return Err(CollectionError::InvalidGeometry {
                bucket_count,
                max_elements,
            });
        }
        Ok(Self {
            buckets: empty_buckets(bucket_count),
            max_elements,
            count: 0,
            grow: false,
        })
    }

    /// Same as [`ChainedHashSet::new`] with growth switched on or off.
    ///
    /// # Errors
    ///
    /// See [`ChainedHashSet::new`].
    pub fn with_growth(
        bucket_count: usize,
        max_elements: usize,
        grow: bool,
    ) -> Result<Self, CollectionError> {
        let mut set = Self::new(bucket_count, max_elements)?;
        set.grow = grow;
        Ok(set)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current number of buckets (changes on growth).
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Hard cap on the number of elements.
    #[must_use]
    pub fn max_elements(&self) -> usize {
        self.max_elements
    }

    #[must_use]
    pub fn is_growth_enabled(&self) -> bool {
        self.grow
    }

    pub fn set_growth_enabled(&mut self, grow: bool) {
        self.grow = grow;
    }

    /// Insert `value` under `hash` unless an entry with the same hash
    /// satisfying `is_same` already exists.
    ///
    /// Returns `Ok(true)` if inserted, `Ok(false)` if an equal entry was
    /// already present (the existing entry wins). The duplicate check runs
    /// before the capacity check, so re-adding a present element to a full
    /// set is not an error.
    ///
    /// # Errors
    ///
    /// [`CollectionError::CapacityExceeded`] if the set is full. The set is
    /// left unchanged.
    pub fn add_by<F>(&mut self, hash: u32, value: T, is_same: F) -> Result<bool, CollectionError>
    where
        F: FnMut(&T) -> bool,
    {
        if self.contains_by(hash, is_same) {
            return Ok(false);
        }
        if self.count >= self.max_elements {
            return Err(CollectionError::CapacityExceeded {
                capacity: self.max_elements,
            });
        }
        let bucket = self.bucket_of(hash);
        self.buckets[bucket].push_back(Entry { hash, value });
        self.count += 1;
        self.maybe_grow();
        Ok(true)
    }

    /// Returns `true` if an entry with `hash` satisfies `is_same`.
    pub fn contains_by<F>(&self, hash: u32, is_same: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.get_by(hash, is_same).is_some()
    }

    /// The entry with `hash` satisfying `is_same`, if any.
    pub fn get_by<F>(&self, hash: u32, mut is_same: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.buckets[self.bucket_of(hash)]
            .find(|entry| entry.hash == hash && is_same(&entry.value))
            .map(|entry| &entry.value)
    }

    /// Mutable access to the entry with `hash` satisfying `is_same`.
    pub fn get_mut_by<F>(&mut self, hash: u32, mut is_same: F) -> Option<&mut T>
    where
        F: FnMut(&T) -> bool,
    {
        let bucket = self.bucket_of(hash);
        self.buckets[bucket]
            .find_mut(|entry| entry.hash == hash && is_same(&entry.value))
            .map(|entry| &mut entry.value)
    }

    /// Unlink and return the entry with `hash` satisfying `is_same`.
    ///
    /// Removing an absent entry is a no-op returning `None`.
    pub fn remove_by<F>(&mut self, hash: u32, mut is_same: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let bucket = self.bucket_of(hash);
        let removed = self.buckets[bucket]
            .remove_first(|entry| entry.hash == hash && is_same(&entry.value))?;
        self.count -= 1;
        Some(removed.value)
    }

    /// Iterate over every element, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter().map(|entry| &entry.value))
    }

    /// Move every element into one vector, leaving the set empty.
    ///
    /// Bucket geometry and the growth flag are retained.
    #[must_use]
    pub fn drain(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.count);
        for chain in &mut self.buckets {
            let mut entries = Vec::with_capacity(chain.len());
            chain.drain_into(&mut entries);
            out.extend(entries.into_iter().map(|entry| entry.value));
        }
        self.count = 0;
        out
    }

    /// Drop every element; geometry and growth flag are retained.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.count = 0;
    }

    fn bucket_of(&self, hash: u32) -> usize {
        hash as usize % self.buckets.len()
    }

    fn maybe_grow(&mut self) {
        let current = self.buckets.len();
        let Some(doubled) = current.checked_mul(2) else {
            return;
        };
        if !self.grow || doubled > self.max_elements || self.count <= doubled {
            return;
        }

        if let Err(err) = self.rehash(doubled) {
            self.growth_failed(doubled, &err);
        }
    }

    /// Move every entry into a table of `doubled` buckets. Nothing moves
    /// unless both reservations succeed.
    fn rehash(&mut self, doubled: usize) -> Result<(), TryReserveError> {
        let mut fresh: Vec<Chain<Entry<T>>> = Vec::new();
        fresh.try_reserve_exact(doubled)?;
        let mut moved: Vec<Entry<T>> = Vec::new();
        moved.try_reserve_exact(self.count)?;

        fresh.resize_with(doubled, Chain::new);
        for chain in &mut self.buckets {
            chain.drain_into(&mut moved);
        }
        for entry in moved {
            fresh[entry.hash as usize % doubled].push_back(entry);
        }
        let current = self.buckets.len();
        self.buckets = fresh;
        debug!(
            "hash set grew from {current} to {doubled} buckets at {} elements",
            self.count
        );
        Ok(())
    }

    fn growth_failed(&mut self, doubled: usize, err: &TryReserveError) {
        warn!(
            "hash set growth to {doubled} buckets failed ({err}); growth disabled, keeping {} buckets",
            self.buckets.len()
        );
        self.grow = false;
    }
}

impl<T: Equatable + Hashable> ChainedHashSet<T> {
    /// Insert `item` unless an equal element is already present.
    ///
    /// # Errors
    ///
    /// See [`ChainedHashSet::add_by`].
    pub fn add(&mut self, item: T) -> Result<bool, CollectionError> {
        let hash = item.stable_hash();
        if self.contains_by(hash, |existing| existing.is_equal(&item)) {
            return Ok(false);
        }
        self.add_by(hash, item, |_| false)
    }

    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.contains_by(item.stable_hash(), |existing| existing.is_equal(item))
    }

    /// The stored element equal to `item`.
    #[must_use]
    pub fn get(&self, item: &T) -> Option<&T> {
        self.get_by(item.stable_hash(), |existing| existing.is_equal(item))
    }

    pub fn get_mut(&mut self, item: &T) -> Option<&mut T> {
        self.get_mut_by(item.stable_hash(), |existing| existing.is_equal(item))
    }

    /// Remove and return the stored element equal to `item`.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        self.remove_by(item.stable_hash(), |existing| existing.is_equal(item))
    }

    /// Replace the stored element equal to `item` (or insert it).
    ///
    /// Returns the previous element, if there was one.
    ///
    /// # Errors
    ///
    /// [`CollectionError::CapacityExceeded`] if no equal element was present
    /// and the set is full.
    pub fn replace(&mut self, item: T) -> Result<Option<T>, CollectionError> {
        let previous = self.remove(&item);
        self.add_by(item.stable_hash(), item, |_| false)?;
        Ok(previous)
    }
}

impl<T> fmt::Debug for ChainedHashSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedHashSet")
            .field("count", &self.count)
            .field("bucket_count", &self.buckets.len())
            .field("max_elements", &self.max_elements)
            .field("grow", &self.grow)
            .finish()
    }
}

fn empty_buckets<T>(bucket_count: usize) -> Vec<Chain<T>> {
    let mut buckets = Vec::with_capacity(bucket_count);
    buckets.resize_with(bucket_count, Chain::new);
    buckets
}
