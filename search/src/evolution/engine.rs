//! Population lifecycle: random start, fitness sort, breeding.

use std::cmp::Ordering;
use std::time::Instant;

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;

use lodestar_kernel::capability::{Evaluator, Gene};
use lodestar_kernel::collections::MaxHeap;

use super::chromosome::Chromosome;
use super::config::EvolutionConfig;
use super::crossover::k_point;
use super::selection::{fitness_weights, stochastic_universal_sampling};
use super::EvolutionError;

/// Heap slot for the fitness sort; ordered by fitness only.
struct Ranked {
    fitness: u32,
    index: usize,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.fitness == other.fitness
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fitness.cmp(&other.fitness)
    }
}

/// A fixed-size population of chromosomes.
///
/// After [`Population::evaluate_population_fitness`] the chromosomes are
/// ordered by fitness, best first. Order among equal fitness is
/// unspecified.
#[derive(Debug, Clone)]
pub struct Population<G> {
    config: EvolutionConfig,
    chromosomes: Vec<Chromosome<G>>,
    generation: u32,
    total_fitness: u64,
}

/// Result of [`Population::evolve`].
#[derive(Debug, Clone)]
pub struct EvolutionOutcome<G> {
    pub best: Chromosome<G>,
    /// Generations bred after the initial population.
    pub generations: u32,
    /// Total population fitness after each evaluation, initial first.
    pub fitness_history: Vec<u64>,
    /// Chromosomes passed to the evaluator.
    pub evaluations: u64,
}

impl<G: Gene> Population<G> {
    /// An empty population.
    ///
    /// # Errors
    ///
    /// [`EvolutionError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: EvolutionConfig) -> Result<Self, EvolutionError> {
        config.validate()?;
        Ok(Self {
            chromosomes: Vec::with_capacity(config.population_size),
            config,
            generation: 0,
            total_fitness: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    #[must_use]
    pub fn chromosomes(&self) -> &[Chromosome<G>] {
        &self.chromosomes
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Sum of fitness from the last evaluation.
    #[must_use]
    pub fn total_fitness(&self) -> u64 {
        self.total_fitness
    }

    /// The fittest chromosome of the last evaluation.
    #[must_use]
    pub fn best(&self) -> Option<&Chromosome<G>> {
        self.chromosomes.first()
    }

    /// Replace the population with `population_size` random chromosomes
    /// and restart the generation counter.
    pub fn initialize_random_population<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let length = self.config.chromosome_length;
        self.chromosomes = (0..self.config.population_size)
            .map(|_| Chromosome::random(length, rng))
            .collect();
        self.generation = 0;
        self.total_fitness = 0;
    }

    /// Score every chromosome once and sort best first.
    ///
    /// # Errors
    ///
    /// [`EvolutionError::Collection`] only if the sort heap is undersized,
    /// which cannot happen for a population built by this type.
    pub fn evaluate_population_fitness<E: Evaluator<G> + ?Sized>(
        &mut self,
        evaluator: &E,
    ) -> Result<(), EvolutionError> {
        let mut sorter = MaxHeap::new(self.chromosomes.len());
        let mut total = 0u64;
        for (index, chromosome) in self.chromosomes.iter_mut().enumerate() {
            let fitness = evaluator.fitness(chromosome.genes());
            chromosome.set_fitness(fitness);
            total += u64::from(fitness);
            sorter.insert(Ranked { fitness, index })?;
        }

        let mut slots: Vec<Option<Chromosome<G>>> = self.chromosomes.drain(..).map(Some).collect();
        while let Some(Ranked { index, .. }) = sorter.extract_max() {
            if let Some(chromosome) = slots[index].take() {
                self.chromosomes.push(chromosome);
            }
        }
        self.total_fitness = total;
        Ok(())
    }

    /// Replace the population with the next generation: elites, then
    /// crossover children of SUS-selected parents (each possibly mutated),
    /// then random immigrants. Expects an evaluated population.
    ///
    /// # Errors
    ///
    /// [`EvolutionError::InvalidConfig`] if the crossover points do not fit
    /// the chromosome length.
    pub fn generate_new_generation<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), EvolutionError> {
        let quotas = self.config.quotas();
        let size = self.config.population_size;
        let mut next = Vec::with_capacity(size);

        next.extend(self.chromosomes.iter().take(quotas.elitism).cloned());

        let parent_count = quotas.offspring + quotas.offspring % 2;
        let weights = fitness_weights(self.chromosomes.iter().map(Chromosome::fitness));
        let mut parents = stochastic_universal_sampling(&weights, parent_count, rng);
        parents.shuffle(rng);
        let mut children = Vec::with_capacity(parent_count);
        for pair in parents.chunks_exact(2) {
            let (a, b) = k_point(
                self.chromosomes[pair[0]].genes(),
                self.chromosomes[pair[1]].genes(),
                self.config.crossover_points,
                rng,
            )?;
            children.push(Chromosome::new(a));
            children.push(Chromosome::new(b));
        }
        children.truncate(quotas.offspring);
        for child in &mut children {
            if rng.random_bool(self.config.mutation_probability) {
                child.mutate(rng);
            }
        }
        next.extend(children);

        let length = self.config.chromosome_length;
        while next.len() < size {
            next.push(Chromosome::random(length, rng));
        }

        self.chromosomes = next;
        self.generation += 1;
        trace!(
            "generation {}: {} elites, {} children",
            self.generation,
            quotas.elitism,
            quotas.offspring
        );
        Ok(())
    }

    /// Initialize, then breed and re-evaluate until the generation cap or
    /// the time limit.
    ///
    /// # Errors
    ///
    /// See [`Population::evaluate_population_fitness`] and
    /// [`Population::generate_new_generation`].
    pub fn evolve<E, R>(&mut self, evaluator: &E, rng: &mut R) -> Result<EvolutionOutcome<G>, EvolutionError>
    where
        E: Evaluator<G> + ?Sized,
        R: Rng + ?Sized,
    {
        let started = Instant::now();
        let size = self.config.population_size as u64;
        self.initialize_random_population(rng);
        self.evaluate_population_fitness(evaluator)?;
        let mut fitness_history = vec![self.total_fitness];
        let mut evaluations = size;

        while self.generation < self.config.generations {
            if self
                .config
                .max_time
                .is_some_and(|max| started.elapsed() > max)
            {
                debug!("evolution: time limit reached at generation {}", self.generation);
                break;
            }
            self.generate_new_generation(rng)?;
            self.evaluate_population_fitness(evaluator)?;
            fitness_history.push(self.total_fitness);
            evaluations += size;
        }

        let best = self
            .best()
            .cloned()
            .ok_or_else(|| EvolutionError::InvalidConfig {
                detail: "population is empty".to_owned(),
            })?;
        debug!(
            "evolution: {} generations, best fitness {}",
            self.generation,
            best.fitness()
        );
        Ok(EvolutionOutcome {
            best,
            generations: self.generation,
            fitness_history,
            evaluations,
        })
    }
}
