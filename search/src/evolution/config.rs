//! Evolution configuration and its validation.

use std::time::Duration;

use super::EvolutionError;

/// Population shape and per-generation quotas.
///
/// `elitism`, `offspring` and `immigrants` are relative weights. They are
/// turned into per-generation counts by [`EvolutionConfig::quotas`].
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub chromosome_length: usize,
    /// Generations to breed after the initial population.
    pub generations: u32,
    pub elitism: u32,
    pub offspring: u32,
    pub immigrants: u32,
    /// Cut points per crossover, at least 1 and below `chromosome_length`.
    pub crossover_points: usize,
    /// Per-child probability of replacing one random gene.
    pub mutation_probability: f64,
    /// Stop breeding once this much wall-clock time has passed.
    pub max_time: Option<Duration>,
}

/// Per-generation counts derived from the weights. They sum to the
/// population size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quotas {
    pub elitism: usize,
    pub offspring: usize,
    pub immigrants: usize,
}

impl EvolutionConfig {
    /// # Errors
    ///
    /// [`EvolutionError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), EvolutionError> {
        if self.population_size == 0 {
            return Err(invalid("population_size must be at least 1"));
        }
        if self.chromosome_length == 0 {
            return Err(invalid("chromosome_length must be at least 1"));
        }
        let total = u64::from(self.elitism) + u64::from(self.offspring) + u64::from(self.immigrants);
        if total == 0 {
            return Err(invalid("elitism + offspring + immigrants must be positive"));
        }
        if self.offspring > 0 && self.crossover_points == 0 {
            return Err(invalid("crossover_points must be at least 1"));
        }
        if self.offspring > 0 && self.chromosome_length > 1 && self.crossover_points >= self.chromosome_length {
            return Err(invalid(format!(
                "crossover_points {} must be below chromosome_length {}",
                self.crossover_points, self.chromosome_length
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(invalid(format!(
                "mutation_probability {} outside [0, 1]",
                self.mutation_probability
            )));
        }
        Ok(())
    }

    /// Split `population_size` by the weights, rounding elitism and
    /// offspring down; the remainder goes to immigrants.
    #[must_use]
    pub fn quotas(&self) -> Quotas {
        let total = u128::from(self.elitism) + u128::from(self.offspring) + u128::from(self.immigrants);
        let share = |weight: u32| -> usize {
            if total == 0 {
                return 0;
            }
            let scaled = self.population_size as u128 * u128::from(weight) / total;
            usize::try_from(scaled).unwrap_or(self.population_size)
        };
        let elitism = share(self.elitism);
        let offspring = share(self.offspring);
        Quotas {
            elitism,
            offspring,
            immigrants: self.population_size - elitism - offspring,
        }
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            chromosome_length: 50,
            generations: 100,
            elitism: 10,
            offspring: 80,
            immigrants: 10,
            crossover_points: 1,
            mutation_probability: 0.02,
            max_time: None,
        }
    }
}

fn invalid(detail: impl Into<String>) -> EvolutionError {
    EvolutionError::InvalidConfig {
        detail: detail.into(),
    }
}
