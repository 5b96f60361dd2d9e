//! Path finding by evolving move sequences.
//!
//! A chromosome is a sequence of [`OperationGene`]s; gene `g` names the
//! start state's operation `g % count`. A chromosome is replayed from the
//! start until it runs out of genes or reaches the finish; genes whose
//! operation does not apply are consumed without moving. Fitness rewards
//! finishing early and ending closer (by heuristic) to the finish than the
//! start was.

use std::cell::Cell;

use log::debug;
use rand::Rng;

use lodestar_kernel::capability::{Equatable, Evaluator, Generative, Hashable, InformedState, Randomizable};

use super::config::EvolutionConfig;
use super::engine::Population;
use super::EvolutionError;
use crate::cutoff::Cutoff;
use crate::outcome::{GeneratedPath, SearchResult, SearchStats, TerminationReason};
use crate::policy::SearchPolicy;
use crate::session::Session;

/// Index into a state's operation list, reduced modulo its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationGene(pub u16);

impl Equatable for OperationGene {
    fn is_equal(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Hashable for OperationGene {
    fn stable_hash(&self) -> u32 {
        u32::from(self.0)
    }
}

impl Randomizable for OperationGene {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random())
    }
}

/// Replay-based fitness of operation genes between two states.
pub struct PathFitness<'a, S: Generative> {
    start: &'a S,
    finish: &'a S,
    operations: Vec<S::Op>,
    heuristic_param: i32,
    generated: Cell<u64>,
}

impl<'a, S: InformedState> PathFitness<'a, S> {
    #[must_use]
    pub fn new(start: &'a S, finish: &'a S, heuristic_param: i32) -> Self {
        Self {
            start,
            finish,
            operations: start.operations(),
            heuristic_param,
            generated: Cell::new(0),
        }
    }

    fn operation(&self, gene: OperationGene) -> Option<&S::Op> {
        if self.operations.is_empty() {
            return None;
        }
        self.operations.get(usize::from(gene.0) % self.operations.len())
    }

    /// Replay `genes`, returning the state reached, the genes consumed and
    /// the path of applied moves.
    #[must_use]
    pub fn replay(&self, genes: &[OperationGene]) -> (GeneratedPath<S>, usize) {
        let mut path = GeneratedPath::single(self.start.clone());
        let mut consumed = 0;
        for &gene in genes {
            let current = path.last().unwrap_or(self.start);
            if current.is_equal(self.finish) {
                break;
            }
            consumed += 1;
            let Some(op) = self.operation(gene) else {
                continue;
            };
            if let Some(next) = current.generate(op) {
                self.generated.set(self.generated.get() + 1);
                path.push(op.clone(), next);
            }
        }
        (path, consumed)
    }

    /// Successful `generate` calls made by every replay so far.
    #[must_use]
    pub fn generated(&self) -> u64 {
        self.generated.get()
    }
}

impl<S: InformedState> Evaluator<OperationGene> for PathFitness<'_, S> {
    /// `len - consumed + h(start) - h(reached)`, clamped at 0.
    fn fitness(&self, chromosome: &[OperationGene]) -> u32 {
        let (path, consumed) = self.replay(chromosome);
        let reached = path.last().unwrap_or(self.start);
        let param = self.heuristic_param;
        let score = chromosome.len() as i64 - consumed as i64
            + i64::from(self.start.heuristic_distance(self.finish, param))
            - i64::from(reached.heuristic_distance(self.finish, param));
        u32::try_from(score.max(0)).unwrap_or(u32::MAX)
    }
}

/// Genetic path search. Start, finish and the heuristic parameter come from
/// the session; population shape from [`EvolutionConfig`].
#[derive(Debug)]
pub struct EvolutionPathSearch<S> {
    session: Session<S>,
    config: EvolutionConfig,
}

impl<S: InformedState> EvolutionPathSearch<S> {
    /// # Errors
    ///
    /// [`EvolutionError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: EvolutionConfig) -> Result<Self, EvolutionError> {
        config.validate()?;
        Ok(Self {
            session: Session::new(SearchPolicy::default())?,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// # Errors
    ///
    /// [`EvolutionError::Search`] while running.
    pub fn set_start(&mut self, start: S) -> Result<(), EvolutionError> {
        Ok(self.session.set_start(start)?)
    }

    /// # Errors
    ///
    /// [`EvolutionError::Search`] while running.
    pub fn set_finish(&mut self, finish: S) -> Result<(), EvolutionError> {
        Ok(self.session.set_finish(finish)?)
    }

    /// # Errors
    ///
    /// [`EvolutionError::Search`] while running.
    pub fn set_heuristic_param(&mut self, param: i32) -> Result<(), EvolutionError> {
        Ok(self.session.set_heuristic_param(param)?)
    }

    /// # Errors
    ///
    /// [`EvolutionError::Search`] while running, or
    /// [`EvolutionError::InvalidConfig`] if `config` fails validation.
    pub fn set_config(&mut self, config: EvolutionConfig) -> Result<(), EvolutionError> {
        self.session.ensure_idle("evolution config")?;
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Evolve move sequences and return the replay of the best one.
    ///
    /// The path always starts at the start state. The result is
    /// [`TerminationReason::GoalReached`] only if the replay ends on the
    /// finish state, [`TerminationReason::TimeCutoff`] if the time limit
    /// stopped breeding early, and [`TerminationReason::Exhausted`]
    /// otherwise (the path is then best-effort).
    ///
    /// # Errors
    ///
    /// [`EvolutionError::Search`] if the start or finish state is missing
    /// or a search is already running.
    pub fn find_path<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<SearchResult<S>, EvolutionError> {
        let (start, finish, policy) = self.session.begin()?;
        let outcome = self.run(&start, &finish, &policy, rng);
        self.session.reset();
        outcome
    }

    fn run<R: Rng + ?Sized>(
        &self,
        start: &S,
        finish: &S,
        policy: &SearchPolicy,
        rng: &mut R,
    ) -> Result<SearchResult<S>, EvolutionError> {
        let cutoff = Cutoff::start(policy);
        let fitness = PathFitness::new(start, finish, policy.heuristic_param);
        let mut population = Population::new(self.config.clone())?;
        let outcome = population.evolve(&fitness, rng)?;

        let (path, _) = fitness.replay(outcome.best.genes());
        let reached_goal = path.last().is_some_and(|last| last.is_equal(finish));
        let termination = if reached_goal {
            TerminationReason::GoalReached
        } else if outcome.generations < self.config.generations {
            TerminationReason::TimeCutoff
        } else {
            TerminationReason::Exhausted
        };
        debug!(
            "evolution search: {termination} after {} generations, {} moves",
            outcome.generations,
            path.moves()
        );

        let mut stats = SearchStats::new(policy.heuristic_param);
        stats.searched_nodes = outcome.evaluations;
        stats.generated_nodes = fitness.generated();
        stats.max_open_size = self.config.population_size;
        stats.elapsed = cutoff.elapsed();
        Ok(SearchResult {
            path: Some(path),
            stats,
            termination,
        })
    }
}
