//! Container properties: heap order, exact membership under collisions,
//! capacity enforcement and growth.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use lodestar_kernel::capability::{Equatable, Hashable};
use lodestar_kernel::collections::{BoundedStack, ChainedHashSet, MaxHeap, MinHeap};
use lodestar_kernel::error::CollectionError;

/// Identity and hash chosen independently, to force collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Key {
    id: u32,
    hash: u32,
}

impl Equatable for Key {
    fn is_equal(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hashable for Key {
    fn stable_hash(&self) -> u32 {
        self.hash
    }
}

fn key(id: u32, hash: u32) -> Key {
    Key { id, hash }
}

fn take_one(model: &mut Vec<i32>, value: i32) {
    let at = model.iter().position(|&v| v == value).unwrap();
    model.swap_remove(at);
}

#[test]
fn heap_peek_tracks_model_under_random_operations() {
    let mut rng = SmallRng::seed_from_u64(41);
    let mut min = MinHeap::new(64);
    let mut min_model: Vec<i32> = Vec::new();
    let mut max = MaxHeap::new(64);
    let mut max_model: Vec<i32> = Vec::new();
    for _ in 0..2_000 {
        let value = rng.random_range(-50..50);
        let grow = rng.random_bool(0.6);

        if min_model.len() < 64 && (min_model.is_empty() || grow) {
            min.insert(value).unwrap();
            min_model.push(value);
        } else {
            let low = min.extract_min().unwrap();
            assert_eq!(Some(low), min_model.iter().copied().min());
            take_one(&mut min_model, low);
        }
        assert_eq!(min.peek_min().copied(), min_model.iter().copied().min());
        assert_eq!(min.len(), min_model.len());

        if max_model.len() < 64 && (max_model.is_empty() || grow) {
            max.insert(value).unwrap();
            max_model.push(value);
        } else {
            let high = max.extract_max().unwrap();
            assert_eq!(Some(high), max_model.iter().copied().max());
            take_one(&mut max_model, high);
        }
        assert_eq!(max.peek_max().copied(), max_model.iter().copied().max());
        assert_eq!(max.len(), max_model.len());
    }
}

#[test]
fn heap_capacity_is_enforced_without_side_effects() {
    let mut heap = MinHeap::new(3);
    for v in [5, 1, 3] {
        heap.insert(v).unwrap();
    }
    assert_eq!(
        heap.insert(0),
        Err(CollectionError::CapacityExceeded { capacity: 3 })
    );
    assert_eq!(heap.len(), 3);
    assert_eq!(heap.peek_min(), Some(&1));
    assert_eq!(heap.into_sorted_vec(), vec![1, 3, 5]);
}

#[test]
fn colliding_hashes_keep_exact_membership() {
    let mut set = ChainedHashSet::new(2, 4).unwrap();
    let items = [key(10, 0), key(11, 1), key(12, 2), key(13, 3)];
    for item in items {
        assert!(set.add(item).unwrap());
    }
    assert_eq!(set.len(), 4);
    for item in &items {
        assert!(set.contains(item), "{item:?}");
    }
    // Same bucket, different identity.
    assert!(!set.contains(&key(14, 0)));
    // Same identity, different hash: equality never overrides the hash.
    assert!(!set.contains(&key(10, 2)));
}

#[test]
fn hash_set_capacity_is_enforced_without_side_effects() {
    let mut set = ChainedHashSet::new(2, 4).unwrap();
    for id in 0..4 {
        set.add(key(id, id)).unwrap();
    }
    assert_eq!(
        set.add(key(9, 9)),
        Err(CollectionError::CapacityExceeded { capacity: 4 })
    );
    assert_eq!(set.len(), 4);
    assert!(!set.contains(&key(9, 9)));
    // Re-adding a present element into a full set is a no-op.
    assert_eq!(set.add(key(2, 2)), Ok(false));
    assert_eq!(set.len(), 4);
}

#[test]
fn random_add_remove_matches_model_despite_collisions() {
    let mut rng = SmallRng::seed_from_u64(77);
    let mut set = ChainedHashSet::new(4, 40).unwrap();
    let mut model: Vec<u32> = Vec::new();
    for _ in 0..3_000 {
        let id = rng.random_range(0..40);
        // Hash space of 5 values: heavy collisions by construction.
        let item = key(id, id % 5);
        if rng.random_bool(0.5) {
            let added = set.add(item).unwrap();
            assert_eq!(added, !model.contains(&id));
            if added {
                model.push(id);
            }
        } else {
            let removed = set.remove(&item);
            let at = model.iter().position(|&m| m == id);
            assert_eq!(removed.is_some(), at.is_some());
            if let Some(at) = at {
                model.swap_remove(at);
            }
        }
        assert_eq!(set.len(), model.len());
    }
    for id in 0..40 {
        assert_eq!(set.contains(&key(id, id % 5)), model.contains(&id));
    }
}

#[test]
fn growth_neither_loses_nor_duplicates() {
    let mut grown = ChainedHashSet::with_growth(2, 256, true).unwrap();
    let mut fixed = ChainedHashSet::new(2, 256).unwrap();
    let mut rng = SmallRng::seed_from_u64(3);
    for id in 0..200 {
        let item = key(id, rng.random());
        grown.add(item).unwrap();
        fixed.add(item).unwrap();
    }
    assert!(grown.bucket_count() > 2);
    assert_eq!(fixed.bucket_count(), 2);
    assert_eq!(grown.len(), 200);

    let mut a = grown.drain();
    let mut b = fixed.drain();
    a.sort();
    b.sort();
    assert_eq!(a, b);
    assert!(a.windows(2).all(|w| w[0].id != w[1].id));
    assert!(grown.is_empty());
}

#[test]
fn stack_capacity_is_enforced_without_side_effects() {
    let mut stack = BoundedStack::new(2);
    stack.push('a').unwrap();
    stack.push('b').unwrap();
    assert_eq!(
        stack.push('c'),
        Err(CollectionError::CapacityExceeded { capacity: 2 })
    );
    assert_eq!(stack.peek(), Some(&'b'));
    assert_eq!(stack.pop(), Some('b'));
    assert_eq!(stack.pop(), Some('a'));
    assert_eq!(stack.pop(), None);
}
