//! Operator traits
//!
//! This module defines the crossover, mutation and selection policies. All
//! policies are stateless: randomness comes from the caller's `Rng`, and
//! operators return new chromosomes instead of editing their inputs.

use rand::Rng;

use crate::chromosome::chromosome::Chromosome;
use crate::chromosome::traits::Encoding;
use crate::error::{GeneticError, GeneticResult};
use crate::population::population::Population;

/// Two chromosomes produced or consumed together
pub type ChromosomePair<E> = (Chromosome<E>, Chromosome<E>);

/// Crossover policy
///
/// Combines genetic material from two parents to create two offspring.
pub trait CrossoverPolicy<E: Encoding>: Send + Sync {
    /// Recombine two parents unconditionally
    fn mate<R: Rng>(
        &self,
        first: &Chromosome<E>,
        second: &Chromosome<E>,
        rng: &mut R,
    ) -> GeneticResult<ChromosomePair<E>>;

    /// Recombine with probability `rate`, otherwise return copies of the parents
    fn crossover<R: Rng>(
        &self,
        first: &Chromosome<E>,
        second: &Chromosome<E>,
        rate: f64,
        rng: &mut R,
    ) -> GeneticResult<ChromosomePair<E>> {
        let rate = GeneticError::check_rate("crossover rate", rate)?;
        if rng.gen::<f64>() < rate {
            self.mate(first, second, rng)
        } else {
            Ok((first.clone(), second.clone()))
        }
    }
}

/// Mutation policy
///
/// Produces a randomly changed copy of a chromosome.
pub trait MutationPolicy<E: Encoding>: Send + Sync {
    /// Mutate a chromosome
    ///
    /// `rate` is the probability the caller selected this chromosome with.
    /// None of the provided operators read it: single-allele operators always
    /// change one allele, and `GaussianMutation` carries its own per-allele
    /// probability.
    fn mutate<R: Rng>(
        &self,
        original: &Chromosome<E>,
        rate: f64,
        rng: &mut R,
    ) -> GeneticResult<Chromosome<E>>;
}

/// Selection policy
///
/// Picks parents out of a population.
pub trait SelectionPolicy<E: Encoding>: Send + Sync {
    /// Select a single chromosome
    fn select<'p, R: Rng>(
        &self,
        population: &'p Population<E>,
        rng: &mut R,
    ) -> GeneticResult<&'p Chromosome<E>>;

    /// Select two parents with independent draws
    fn select_pair<'p, R: Rng>(
        &self,
        population: &'p Population<E>,
        rng: &mut R,
    ) -> GeneticResult<(&'p Chromosome<E>, &'p Chromosome<E>)> {
        let first = self.select(population, rng)?;
        let second = self.select(population, rng)?;
        Ok((first, second))
    }
}

/// Check that two parents have the same length
pub(crate) fn check_dimensions<E: Encoding>(
    first: &Chromosome<E>,
    second: &Chromosome<E>,
) -> GeneticResult<usize> {
    if first.len() != second.len() {
        return Err(GeneticError::DimensionMismatch {
            expected: first.len(),
            actual: second.len(),
        });
    }
    Ok(first.len())
}
