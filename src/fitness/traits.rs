//! Fitness traits
//!
//! This module defines the fitness function seam. Fitness is always maximized;
//! minimization problems are expressed by negating the objective.

use std::sync::Arc;

use crate::chromosome::chromosome::{Chromosome, SharedFitness};
use crate::chromosome::traits::Encoding;

/// Computes the fitness of a chromosome
///
/// Implementations must be deterministic for a given representation, since
/// each chromosome caches the first value it sees.
pub trait FitnessFunction<E: Encoding>: Send + Sync {
    /// Fitness of the chromosome (higher is better)
    fn compute(&self, chromosome: &Chromosome<E>) -> f64;
}

impl<E, F> FitnessFunction<E> for F
where
    E: Encoding,
    F: Fn(&Chromosome<E>) -> f64 + Send + Sync,
{
    fn compute(&self, chromosome: &Chromosome<E>) -> f64 {
        self(chromosome)
    }
}

/// Turns a minimization objective into a maximization fitness
#[derive(Clone, Debug)]
pub struct Negated<F>(pub F);

impl<E, F> FitnessFunction<E> for Negated<F>
where
    E: Encoding,
    F: FitnessFunction<E>,
{
    fn compute(&self, chromosome: &Chromosome<E>) -> f64 {
        -self.0.compute(chromosome)
    }
}

/// Wrap a fitness function for sharing between chromosomes
pub fn shared<E, F>(fitness: F) -> SharedFitness<E>
where
    E: Encoding,
    F: FitnessFunction<E> + 'static,
{
    Arc::new(fitness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::integral::Integral;

    fn total(c: &Chromosome<Integral>) -> f64 {
        c.representation().iter().sum::<i64>() as f64
    }

    #[test]
    fn test_closure_as_fitness() {
        let fitness = shared(total);
        let c = Chromosome::new(vec![2, 3], Integral::new(0, 5).unwrap(), fitness).unwrap();
        assert_eq!(c.fitness(), 5.0);
    }

    #[test]
    fn test_negated() {
        let fitness = shared(Negated(total));
        let c = Chromosome::new(vec![2, 3], Integral::new(0, 5).unwrap(), fitness).unwrap();
        assert_eq!(c.fitness(), -5.0);
    }
}
