//! Shared helpers for lodestar benchmark suites.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use lodestar_harness::worlds::n_puzzle::PuzzleFixture;
use lodestar_kernel::capability::{Equatable, Hashable};
use lodestar_search::SearchPolicy;

/// Opaque element with an independently chosen hash, for container benches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Keyed {
    pub id: u64,
    pub hash: u32,
}

impl Equatable for Keyed {
    fn is_equal(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hashable for Keyed {
    fn stable_hash(&self) -> u32 {
        self.hash
    }
}

/// `n` keyed elements with seeded random hashes.
#[must_use]
pub fn keyed(n: u64, seed: u64) -> Vec<Keyed> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n).map(|id| Keyed { id, hash: rng.random() }).collect()
}

/// `n` seeded random integers.
#[must_use]
pub fn integers(n: usize, seed: u64) -> Vec<i64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(-1_000_000..1_000_000)).collect()
}

/// Large enough for any 8-puzzle search to finish without overflow.
#[must_use]
pub fn roomy_policy(heuristic_param: i32) -> SearchPolicy {
    SearchPolicy {
        frontier_capacity: 600_000,
        closed_capacity: 200_000,
        bucket_count: 4096,
        grow_closed_set: true,
        heuristic_param,
        ..SearchPolicy::default()
    }
}

/// Seeded 8-puzzle scrambles, one per regime.
///
/// # Panics
///
/// Panics if a fixture cannot be built. Benchmark setup failures are fatal.
#[must_use]
pub fn puzzle_regimes() -> Vec<PuzzleFixture> {
    [(8, 1), (16, 2), (24, 3)]
        .into_iter()
        .map(|(moves, seed)| PuzzleFixture::scrambled(3, 3, moves, seed).expect("scramble"))
        .collect()
}
