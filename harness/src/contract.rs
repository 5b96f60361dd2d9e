//! Fixture contract: what a world hands the runner.
//!
//! A fixture fixes one start/finish pair in a world and describes itself
//! as JSON. Worlds implement the kernel capability traits on their state
//! type; they never touch frontiers, closed sets or reports (those belong
//! to the search crate and the runner).

use lodestar_kernel::capability::InformedState;
use thiserror::Error;

/// Typed failure while building a world or fixture.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("invalid puzzle: {detail}")]
    InvalidPuzzle { detail: String },

    #[error("invalid grid: {detail}")]
    InvalidGrid { detail: String },

    #[error("invalid graph: {detail}")]
    InvalidGraph { detail: String },
}

/// A named search problem.
pub trait SearchFixture {
    type State: InformedState;

    /// Unique fixture identifier (e.g. `"npuzzle_3x3_two_moves"`).
    fn fixture_id(&self) -> &str;

    fn start(&self) -> Self::State;

    fn finish(&self) -> Self::State;

    /// Heuristic selector the fixture is meant to be searched with.
    fn heuristic_param(&self) -> i32 {
        0
    }

    /// World parameters as a JSON value (integers and strings only).
    fn describe(&self) -> serde_json::Value;
}
