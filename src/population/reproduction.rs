//! Reproduction step
//!
//! Bundles the three operators with the crossover and mutation rates, and
//! turns two selected parents into two offspring.

use rand::Rng;

use crate::chromosome::chromosome::Chromosome;
use crate::chromosome::traits::Encoding;
use crate::error::{GeneticError, GeneticResult};
use crate::operators::traits::{ChromosomePair, CrossoverPolicy, MutationPolicy};

/// Operators and rates used to breed a generation
#[derive(Clone, Debug)]
pub struct Reproduction<C, M, S> {
    crossover: C,
    mutation: M,
    selection: S,
    crossover_rate: f64,
    mutation_rate: f64,
}

impl<C, M, S> Reproduction<C, M, S> {
    /// Create a reproduction step; both rates must lie in [0, 1]
    pub fn new(
        crossover: C,
        mutation: M,
        selection: S,
        crossover_rate: f64,
        mutation_rate: f64,
    ) -> GeneticResult<Self> {
        Ok(Self {
            crossover,
            mutation,
            selection,
            crossover_rate: GeneticError::check_rate("crossover rate", crossover_rate)?,
            mutation_rate: GeneticError::check_rate("mutation rate", mutation_rate)?,
        })
    }

    /// Get the crossover operator
    pub fn crossover(&self) -> &C {
        &self.crossover
    }

    /// Get the mutation operator
    pub fn mutation(&self) -> &M {
        &self.mutation
    }

    /// Get the selection operator
    pub fn selection(&self) -> &S {
        &self.selection
    }

    /// Probability that a pair of parents is recombined
    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    /// Probability that each child is mutated
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Breed two offspring from two parents
    ///
    /// The parents are recombined with probability `crossover_rate` (copied
    /// otherwise), then each child is mutated independently with probability
    /// `mutation_rate`.
    pub fn offspring<E, R>(
        &self,
        first: &Chromosome<E>,
        second: &Chromosome<E>,
        rng: &mut R,
    ) -> GeneticResult<ChromosomePair<E>>
    where
        E: Encoding,
        C: CrossoverPolicy<E>,
        M: MutationPolicy<E>,
        R: Rng,
    {
        let (child1, child2) = if rng.gen::<f64>() < self.crossover_rate {
            self.crossover.mate(first, second, rng)?
        } else {
            (first.clone(), second.clone())
        };

        Ok((self.maybe_mutate(child1, rng)?, self.maybe_mutate(child2, rng)?))
    }

    fn maybe_mutate<E, R>(&self, child: Chromosome<E>, rng: &mut R) -> GeneticResult<Chromosome<E>>
    where
        E: Encoding,
        M: MutationPolicy<E>,
        R: Rng,
    {
        if rng.gen::<f64>() < self.mutation_rate {
            self.mutation.mutate(&child, self.mutation_rate, rng)
        } else {
            Ok(child)
        }
    }
}
