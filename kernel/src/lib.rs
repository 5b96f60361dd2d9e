//! Lodestar Kernel: capability traits and capacity-bounded containers.
//!
//! # API Surface
//!
//! - [`capability`] -- the traits a state (or gene) must implement to be
//!   searched: [`capability::Equatable`], [`capability::Hashable`],
//!   [`capability::Generative`], [`capability::Heuristical`],
//!   [`capability::Randomizable`], [`capability::Evaluator`]
//! - [`collections`] -- fixed-capacity binary heaps, the chained hash set,
//!   the singly-linked chain and the bounded stack
//! - [`hash`] -- domain-separated stable hashing for state implementors
//!
//! # Module Dependency Direction
//!
//! `error` ← `collections` → `capability` (hash set convenience methods only).
//! `hash` stands alone.
//!
//! The kernel depends on no other workspace crate. Every container is sized
//! at construction and reports exhaustion as [`error::CollectionError`]
//! instead of growing without bound.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod capability;
pub mod collections;
pub mod error;
pub mod hash;
