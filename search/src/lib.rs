//! Lodestar Search: capacity-bounded graph search over capability traits.
//!
//! This crate depends only on `lodestar_kernel`. It does NOT depend on
//! `lodestar_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! lodestar_kernel  ←  lodestar_search  ←  lodestar_harness
//! (traits, heaps,     (algorithms,         (worlds, runner)
//!  hash set, stack)    sessions, report)
//! ```
//!
//! # Algorithms
//!
//! Every path search implements [`PathSearch`]: configure start, finish
//! and [`SearchPolicy`] while idle, then call [`PathSearch::find_path`].
//!
//! - [`AStar`] -- `g + h` frontier, reopens closed states at a better cost
//! - [`IdaStar`] -- iterative deepening on the `g + h` bound
//! - [`Greedy`] -- `h` frontier, no reopening
//! - [`Bfs`] -- depth frontier, optionally bidirectional
//! - [`Dfs`] -- bounded stack, optional better-path reopening
//!
//! Outside the [`PathSearch`] family: [`StateExplorer`] enumerates
//! reachable states and [`EvolutionPathSearch`] evolves move sequences.
//!
//! # Key types
//!
//! - [`SearchResult`] -- optional [`GeneratedPath`], [`SearchStats`] and a
//!   [`TerminationReason`]
//! - [`SearchReport`] -- deterministic JSON rendering of a result
//! - [`SearchError`] -- capacity, session and reconstruction failures

#![forbid(unsafe_code)]

pub mod astar;
mod best_first;
pub mod bfs;
mod bidirectional;
pub mod closed;
pub mod cutoff;
pub mod dfs;
pub mod error;
pub mod evolution;
pub mod explore;
pub mod greedy;
pub mod ida_star;
pub mod node;
pub mod outcome;
pub mod policy;
pub mod report;
pub mod session;

pub use astar::AStar;
pub use bfs::Bfs;
pub use dfs::Dfs;
pub use error::{SearchError, Structure};
pub use evolution::{EvolutionConfig, EvolutionError, EvolutionPathSearch};
pub use explore::{ExploredState, StateExplorer};
pub use greedy::Greedy;
pub use ida_star::IdaStar;
pub use outcome::{GeneratedPath, SearchResult, SearchStats, TerminationReason};
pub use policy::SearchPolicy;
pub use report::SearchReport;
pub use session::{PathSearch, Phase, Session};
