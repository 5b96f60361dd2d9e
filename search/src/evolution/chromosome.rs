//! Fixed-length gene sequences with an attached fitness.

use rand::Rng;

use lodestar_kernel::capability::{Equatable, Gene, Hashable};
use lodestar_kernel::hash::{stable_hash32, HashDomain};

#[derive(Debug, Clone)]
pub struct Chromosome<G> {
    genes: Vec<G>,
    fitness: u32,
}

impl<G: Gene> Chromosome<G> {
    /// A chromosome with fitness 0 (not yet evaluated).
    #[must_use]
    pub fn new(genes: Vec<G>) -> Self {
        Self { genes, fitness: 0 }
    }

    /// `length` independently drawn genes.
    pub fn random<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        Self::new((0..length).map(|_| G::random(rng)).collect())
    }

    #[must_use]
    pub fn genes(&self) -> &[G] {
        &self.genes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    #[must_use]
    pub fn fitness(&self) -> u32 {
        self.fitness
    }

    pub(crate) fn set_fitness(&mut self, fitness: u32) {
        self.fitness = fitness;
    }

    /// Replace one uniformly chosen gene with a fresh random one.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.genes.is_empty() {
            return;
        }
        let at = rng.random_range(0..self.genes.len());
        self.genes[at] = G::random(rng);
        self.fitness = 0;
    }
}

impl<G: Gene> Equatable for Chromosome<G> {
    fn is_equal(&self, other: &Self) -> bool {
        self.genes.len() == other.genes.len()
            && self.genes.iter().zip(&other.genes).all(|(a, b)| a.is_equal(b))
    }
}

impl<G: Gene> Hashable for Chromosome<G> {
    fn stable_hash(&self) -> u32 {
        let bytes: Vec<u8> = self
            .genes
            .iter()
            .flat_map(|gene| gene.stable_hash().to_be_bytes())
            .collect();
        stable_hash32(HashDomain::Chromosome, &bytes)
    }
}
