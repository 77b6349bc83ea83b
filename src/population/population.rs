//! Population type
//!
//! This module provides the bounded chromosome container and the
//! generational replacement step.

use rand::Rng;
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::chromosome::chromosome::{Chromosome, SharedFitness};
use crate::chromosome::traits::Encoding;
use crate::error::{GeneticError, GeneticResult};
use crate::operators::traits::{CrossoverPolicy, MutationPolicy, SelectionPolicy};
use crate::population::reproduction::Reproduction;
use crate::population::statistics::PopulationStatistics;

/// A bounded population of chromosomes
///
/// The size limit is fixed for the lifetime of a run and every member shares
/// the same representation length.
#[derive(Clone, Debug)]
pub struct Population<E: Encoding> {
    chromosomes: Vec<Chromosome<E>>,
    limit: usize,
}

impl<E: Encoding> Population<E> {
    /// Create an empty population; `limit` must be > 0
    pub fn new(limit: usize) -> GeneticResult<Self> {
        let limit = GeneticError::check_positive("population limit", limit)?;
        Ok(Self {
            chromosomes: Vec::with_capacity(limit),
            limit,
        })
    }

    /// Create a population from existing chromosomes
    pub fn from_chromosomes(chromosomes: Vec<Chromosome<E>>, limit: usize) -> GeneticResult<Self> {
        let mut population = Self::new(limit)?;
        if chromosomes.len() > limit {
            return Err(GeneticError::TooLarge {
                parameter: "population size",
                value: chromosomes.len(),
                max: limit + 1,
            });
        }
        for chromosome in chromosomes {
            population.add_chromosome(chromosome)?;
        }
        Ok(population)
    }

    /// Create a full population of random chromosomes
    pub fn random<R: Rng>(
        limit: usize,
        length: usize,
        encoding: E,
        fitness_function: SharedFitness<E>,
        rng: &mut R,
    ) -> GeneticResult<Self> {
        let mut population = Self::new(limit)?;
        while !population.is_full() {
            let chromosome =
                Chromosome::random(length, encoding.clone(), fitness_function.clone(), rng)?;
            population.add_chromosome(chromosome)?;
        }
        Ok(population)
    }

    /// Add a chromosome
    ///
    /// Fails if the population is full or the chromosome's length differs
    /// from the existing members.
    pub fn add_chromosome(&mut self, chromosome: Chromosome<E>) -> GeneticResult<()> {
        if self.is_full() {
            return Err(GeneticError::TooLarge {
                parameter: "population size",
                value: self.len() + 1,
                max: self.limit + 1,
            });
        }
        if let Some(first) = self.chromosomes.first() {
            if first.len() != chromosome.len() {
                return Err(GeneticError::DimensionMismatch {
                    expected: first.len(),
                    actual: chromosome.len(),
                });
            }
        }
        self.chromosomes.push(chromosome);
        Ok(())
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Maximum number of chromosomes
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Check if the population has reached its limit
    pub fn is_full(&self) -> bool {
        self.chromosomes.len() >= self.limit
    }

    /// Get an iterator over the chromosomes
    pub fn iter(&self) -> impl Iterator<Item = &Chromosome<E>> {
        self.chromosomes.iter()
    }

    /// Get the underlying chromosomes
    pub fn chromosomes(&self) -> &[Chromosome<E>] {
        &self.chromosomes
    }

    /// Take the chromosomes out of this population
    pub fn into_chromosomes(self) -> Vec<Chromosome<E>> {
        self.chromosomes
    }

    /// Get a chromosome by index
    pub fn get(&self, index: usize) -> Option<&Chromosome<E>> {
        self.chromosomes.get(index)
    }

    /// Get the fittest chromosome
    pub fn fittest(&self) -> Option<&Chromosome<E>> {
        self.chromosomes.iter().max_by(|a, b| a.compare_fitness(b))
    }

    /// Get the chromosomes sorted by fitness (best first)
    pub fn sorted_by_fitness(&self) -> Vec<&Chromosome<E>> {
        let mut sorted: Vec<&Chromosome<E>> = self.chromosomes.iter().collect();
        sorted.sort_by(|a, b| b.compare_fitness(a));
        sorted
    }

    /// Compute fitness statistics
    pub fn statistics(&self) -> GeneticResult<PopulationStatistics> {
        PopulationStatistics::from_population(self)
    }

    /// Evaluate the fitness of every chromosome (sequential)
    pub fn evaluate(&self) {
        for chromosome in &self.chromosomes {
            chromosome.fitness();
        }
    }

    /// New population of the same limit holding the fittest chromosomes
    ///
    /// `floor(elitism_rate * len)` chromosomes are kept; they carry their
    /// cached fitness over.
    pub fn with_elites(&self, elitism_rate: f64) -> GeneticResult<Self> {
        let elitism_rate = GeneticError::check_rate("elitism rate", elitism_rate)?;
        if self.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let elite_count = (elitism_rate * self.len() as f64).floor() as usize;
        trace!(elite_count, population_size = self.len(), "carrying over elites");

        let elites = self
            .sorted_by_fitness()
            .into_iter()
            .take(elite_count)
            .cloned()
            .collect();
        Self::from_chromosomes(elites, self.limit)
    }

    /// Produce the next generation
    ///
    /// Elites are carried over first; the remaining slots are filled with
    /// offspring of parents selected from this population. When only one
    /// slot remains the second child of the last pair is dropped.
    pub fn next_generation<C, M, S, R>(
        &self,
        elitism_rate: f64,
        reproduction: &Reproduction<C, M, S>,
        rng: &mut R,
    ) -> GeneticResult<Self>
    where
        C: CrossoverPolicy<E>,
        M: MutationPolicy<E>,
        S: SelectionPolicy<E>,
        R: Rng,
    {
        let mut next = self.with_elites(elitism_rate)?;

        while !next.is_full() {
            let (first, second) = reproduction.selection().select_pair(self, rng)?;
            let (child1, child2) = reproduction.offspring(first, second, rng)?;

            next.add_chromosome(child1)?;
            if !next.is_full() {
                next.add_chromosome(child2)?;
            }
        }

        Ok(next)
    }
}

/// Parallel evaluation support (requires `parallel` feature)
#[cfg(feature = "parallel")]
impl<E: Encoding> Population<E> {
    /// Evaluate the fitness of every chromosome (parallel)
    pub fn evaluate_parallel(&self) {
        self.chromosomes.par_iter().for_each(|chromosome| {
            chromosome.fitness();
        });
    }
}

/// Sequential fallback for parallel evaluation (when `parallel` feature is disabled)
#[cfg(not(feature = "parallel"))]
impl<E: Encoding> Population<E> {
    /// Evaluate the fitness of every chromosome (sequential fallback)
    pub fn evaluate_parallel(&self) {
        self.evaluate();
    }
}

impl<E: Encoding> std::ops::Index<usize> for Population<E> {
    type Output = Chromosome<E>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.chromosomes[index]
    }
}

impl<E: Encoding> IntoIterator for Population<E> {
    type Item = Chromosome<E>;
    type IntoIter = std::vec::IntoIter<Chromosome<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.chromosomes.into_iter()
    }
}

impl<'a, E: Encoding> IntoIterator for &'a Population<E> {
    type Item = &'a Chromosome<E>;
    type IntoIter = std::slice::Iter<'a, Chromosome<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.chromosomes.iter()
    }
}
