//! Example state spaces implementing the kernel capability traits.

pub mod grid;
pub mod move_sequence;
pub mod n_puzzle;
pub mod weighted_graph;
