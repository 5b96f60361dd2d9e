//! Harness runner: dispatch a named algorithm over a world.
//!
//! The runner owns no search logic. It builds the requested
//! [`PathSearch`] implementation, configures it, runs it once and renders
//! the result as a [`SearchReport`].
//!
//! # Pipeline
//!
//! ```text
//! AlgorithmKind → build() → set_start / set_finish → find_path()
//!   → SearchReport::new(name, result)
//! ```

use std::fmt;
use std::str::FromStr;

use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;

use lodestar_kernel::capability::InformedState;
use lodestar_search::evolution::EvolutionConfig;
use lodestar_search::{
    AStar, Bfs, Dfs, EvolutionError, EvolutionPathSearch, Greedy, IdaStar, PathSearch,
    SearchError, SearchPolicy, SearchReport, SearchResult,
};

use crate::contract::SearchFixture;

/// Report name of the evolutionary path search.
pub const EVOLUTION_ALGORITHM: &str = "evolution";

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Evolution(#[from] EvolutionError),

    #[error("unknown algorithm {name:?}")]
    UnknownAlgorithm { name: String },
}

/// Path-search algorithms the runner can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    AStar,
    IdaStar,
    Greedy,
    Bfs,
    BidirectionalBfs,
    Dfs,
    DfsBetterPath,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 7] = [
        Self::AStar,
        Self::IdaStar,
        Self::Greedy,
        Self::Bfs,
        Self::BidirectionalBfs,
        Self::Dfs,
        Self::DfsBetterPath,
    ];

    /// Matches [`PathSearch::name`] of the built search.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AStar => "astar",
            Self::IdaStar => "ida_star",
            Self::Greedy => "greedy",
            Self::Bfs => "bfs",
            Self::BidirectionalBfs => "bidirectional_bfs",
            Self::Dfs => "dfs",
            Self::DfsBetterPath => "dfs_better_path",
        }
    }

    /// Whether the algorithm returns a shortest path when no cutoff fires
    /// (given an admissible heuristic for the informed ones).
    #[must_use]
    pub fn is_optimal(self) -> bool {
        matches!(
            self,
            Self::AStar | Self::IdaStar | Self::Bfs | Self::BidirectionalBfs
        )
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmKind {
    type Err = RunnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| RunnerError::UnknownAlgorithm { name: s.to_owned() })
    }
}

/// Build an idle search for `algorithm`.
///
/// # Errors
///
/// [`SearchError::InvalidPolicy`] if `policy` fails validation.
pub fn build<S: InformedState + 'static>(
    algorithm: AlgorithmKind,
    policy: SearchPolicy,
) -> Result<Box<dyn PathSearch<S>>, SearchError> {
    Ok(match algorithm {
        AlgorithmKind::AStar => Box::new(AStar::new(policy)?),
        AlgorithmKind::IdaStar => Box::new(IdaStar::new(policy)?),
        AlgorithmKind::Greedy => Box::new(Greedy::new(policy)?),
        AlgorithmKind::Bfs | AlgorithmKind::BidirectionalBfs => {
            let mut bfs = Bfs::new(policy)?;
            bfs.set_bidirectional(algorithm == AlgorithmKind::BidirectionalBfs)?;
            Box::new(bfs)
        }
        AlgorithmKind::Dfs | AlgorithmKind::DfsBetterPath => {
            let mut dfs = Dfs::new(policy)?;
            dfs.set_use_better_path(algorithm == AlgorithmKind::DfsBetterPath)?;
            Box::new(dfs)
        }
    })
}

/// Run `algorithm` once from `start` to `finish`.
///
/// # Errors
///
/// [`RunnerError::Search`] for an invalid policy or any search failure.
pub fn search<S: InformedState + 'static>(
    algorithm: AlgorithmKind,
    start: S,
    finish: S,
    policy: SearchPolicy,
) -> Result<SearchResult<S>, RunnerError> {
    let mut search = build(algorithm, policy)?;
    search.set_start(start)?;
    search.set_finish(finish)?;
    Ok(search.find_path()?)
}

/// Run `algorithm` once and render the result.
///
/// # Errors
///
/// See [`search`].
pub fn run<S: InformedState + 'static>(
    algorithm: AlgorithmKind,
    start: S,
    finish: S,
    policy: SearchPolicy,
) -> Result<SearchReport, RunnerError> {
    let result = search(algorithm, start, finish, policy)?;
    let report = SearchReport::new(algorithm.as_str(), &result);
    info!(
        "{algorithm}: {} ({} moves, {} searched, {} generated)",
        report.termination,
        report.moves().map_or_else(|| "-".to_owned(), |m| m.to_string()),
        report.stats.searched_nodes,
        report.stats.generated_nodes
    );
    Ok(report)
}

/// Run `algorithm` over a fixture, using the fixture's heuristic parameter
/// in place of `policy.heuristic_param`.
///
/// # Errors
///
/// See [`search`].
pub fn run_fixture<F>(
    algorithm: AlgorithmKind,
    fixture: &F,
    policy: SearchPolicy,
) -> Result<SearchReport, RunnerError>
where
    F: SearchFixture,
    F::State: 'static,
{
    info!("{}: running {algorithm}", fixture.fixture_id());
    let policy = SearchPolicy {
        heuristic_param: fixture.heuristic_param(),
        ..policy
    };
    run(algorithm, fixture.start(), fixture.finish(), policy)
}

/// Evolve a path over a fixture with a generator seeded from `seed`.
///
/// # Errors
///
/// [`RunnerError::Evolution`] for an invalid config or session failure.
pub fn run_evolution<F: SearchFixture>(
    fixture: &F,
    config: EvolutionConfig,
    seed: u64,
) -> Result<SearchReport, RunnerError> {
    let mut search = EvolutionPathSearch::new(config)?;
    search.set_start(fixture.start())?;
    search.set_finish(fixture.finish())?;
    search.set_heuristic_param(fixture.heuristic_param())?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let result = search.find_path(&mut rng)?;
    let report = SearchReport::new(EVOLUTION_ALGORITHM, &result);
    info!(
        "{}: {EVOLUTION_ALGORITHM} {} after {} evaluations",
        fixture.fixture_id(),
        report.termination,
        report.stats.searched_nodes
    );
    Ok(report)
}
