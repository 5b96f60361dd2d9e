//! Capability traits consumed by the search and evolution layers.
//!
//! A state type never reaches the search core directly; it is used only
//! through these narrow interfaces. Equality and hashing are named methods
//! separate from `PartialEq`/`std::hash::Hash`, and must describe the
//! *logical* state that the closed set deduplicates on.
//!
//! # Contract
//!
//! - `stable_hash` is a pure function of the logical state.
//! - `a.is_equal(&b)` implies `a.stable_hash() == b.stable_hash()`.
//! - `generate` never mutates the receiver; it returns a fresh successor or
//!   `None` when the operation does not apply.
//! - `heuristic_distance(x, _)` is `0` when `x` equals `self`.

use std::fmt::Debug;

use rand::Rng;

/// Logical equality between two values of the same type.
pub trait Equatable {
    /// Returns `true` if both values describe the same logical state.
    fn is_equal(&self, other: &Self) -> bool;
}

/// Stable 32-bit hash of the logical value.
pub trait Hashable {
    /// Hash of the logical value. Must agree with [`Equatable::is_equal`].
    fn stable_hash(&self) -> u32;
}

/// Successor generation.
pub trait Generative: Sized {
    /// Operation identifier (a move label).
    type Op: Clone + PartialEq + Debug;

    /// Operations that may be attempted from this state, in declaration order.
    fn operations(&self) -> Vec<Self::Op>;

    /// Apply `op`, returning the successor or `None` if it is not applicable.
    fn generate(&self, op: &Self::Op) -> Option<Self>;
}

/// Heuristic distance estimate between states.
pub trait Heuristical {
    /// Estimated distance from `self` to `other`.
    ///
    /// `param` selects between heuristic variants for states that offer more
    /// than one; states with a single heuristic ignore it.
    fn heuristic_distance(&self, other: &Self, param: i32) -> u32;
}

/// Everything an uninformed search (BFS, state exploration) needs.
pub trait SearchState: Equatable + Hashable + Generative + Clone {}

impl<T> SearchState for T where T: Equatable + Hashable + Generative + Clone {}

/// Everything an informed search (A*, IDA*, Greedy, DFS) needs.
pub trait InformedState: SearchState + Heuristical {}

impl<T> InformedState for T where T: SearchState + Heuristical {}

/// Random construction from an injected generator.
pub trait Randomizable: Sized {
    /// Draw a uniformly random value.
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

/// One position of a chromosome.
pub trait Gene: Equatable + Hashable + Randomizable + Clone {}

impl<T> Gene for T where T: Equatable + Hashable + Randomizable + Clone {}

/// Fitness function over a whole chromosome. Higher is better.
pub trait Evaluator<G> {
    fn fitness(&self, chromosome: &[G]) -> u32;
}

impl<G, F> Evaluator<G> for F
where
    F: Fn(&[G]) -> u32,
{
    fn fitness(&self, chromosome: &[G]) -> u32 {
        self(chromosome)
    }
}
