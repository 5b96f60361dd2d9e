//! Genetic search.
//!
//! [`engine::Population`] is a generic engine over any
//! [`lodestar_kernel::capability::Gene`] scored by an
//! [`lodestar_kernel::capability::Evaluator`]: fitness sort on the kernel
//! max-heap, elitism, stochastic universal sampling, k-point crossover,
//! mutation and random immigrants. [`path_search::EvolutionPathSearch`]
//! applies it to path finding with operation-index genes.
//!
//! Every random decision draws from a caller-supplied `Rng`.

pub mod chromosome;
pub mod config;
pub mod crossover;
pub mod engine;
pub mod path_search;
pub mod selection;

use lodestar_kernel::error::CollectionError;
use thiserror::Error;

use crate::error::SearchError;

pub use chromosome::Chromosome;
pub use config::{EvolutionConfig, Quotas};
pub use engine::{EvolutionOutcome, Population};
pub use path_search::{EvolutionPathSearch, OperationGene, PathFitness};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvolutionError {
    #[error("invalid evolution config: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Collection(#[from] CollectionError),

    /// Session misuse in [`EvolutionPathSearch`].
    #[error(transparent)]
    Search(#[from] SearchError),
}
