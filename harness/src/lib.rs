//! Lodestar Harness: example worlds and a runner for the search crate.
//!
//! Worlds implement the kernel capability traits and nothing else; the
//! search crate never sees their concrete types. The runner dispatches a
//! named algorithm over a world and renders a [`lodestar_search::SearchReport`].
//!
//! # Worlds
//!
//! - [`worlds::n_puzzle`] -- sliding tiles, four selectable heuristics
//! - [`worlds::grid`] -- 4-connected grid with walls, parsed from ASCII
//! - [`worlds::weighted_graph`] -- explicit directed graph with edge weights
//! - [`worlds::move_sequence`] -- progress evaluator for operation genes

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod runner;
pub mod worlds;
