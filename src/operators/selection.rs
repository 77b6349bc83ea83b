//! Selection operators
//!
//! This module provides tournament selection.

use rand::Rng;

use crate::chromosome::chromosome::Chromosome;
use crate::chromosome::traits::Encoding;
use crate::error::{GeneticError, GeneticResult};
use crate::operators::traits::SelectionPolicy;
use crate::population::population::Population;

/// Tournament selection operator
///
/// Draws `arity` members uniformly with replacement and returns the fittest
/// of them; ties go to the first one drawn. An arity of 1 is uniform random
/// selection.
#[derive(Clone, Copy, Debug)]
pub struct TournamentSelection {
    arity: usize,
}

impl TournamentSelection {
    /// Create a new tournament selection with the given arity
    pub fn new(arity: usize) -> GeneticResult<Self> {
        Ok(Self {
            arity: GeneticError::check_positive("tournament arity", arity)?,
        })
    }

    /// Create binary tournament selection (arity = 2)
    pub fn binary() -> Self {
        Self { arity: 2 }
    }

    /// Number of competitors per tournament
    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl<E: Encoding> SelectionPolicy<E> for TournamentSelection {
    fn select<'p, R: Rng>(
        &self,
        population: &'p Population<E>,
        rng: &mut R,
    ) -> GeneticResult<&'p Chromosome<E>> {
        let members = population.chromosomes();
        if members.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let mut winner = &members[rng.gen_range(0..members.len())];
        for _ in 1..self.arity {
            let challenger = &members[rng.gen_range(0..members.len())];
            if challenger.is_better_than(winner) {
                winner = challenger;
            }
        }
        Ok(winner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::chromosome::chromosome::SharedFitness;
    use crate::chromosome::integral::Integral;

    fn create_population(size: usize) -> Population<Integral> {
        let fitness: SharedFitness<Integral> =
            Arc::new(|c: &Chromosome<Integral>| c.representation()[0] as f64);
        let encoding = Integral::new(0, 1000).unwrap();
        let chromosomes = (0..size as i64)
            .map(|i| Chromosome::new(vec![i], encoding, Arc::clone(&fitness)).unwrap())
            .collect();
        Population::from_chromosomes(chromosomes, size).unwrap()
    }

    #[test]
    fn test_tournament_selection_selects_member() {
        let mut rng = StdRng::seed_from_u64(1);
        let population = create_population(10);
        let selection = TournamentSelection::new(3).unwrap();

        for _ in 0..100 {
            let selected = selection.select(&population, &mut rng).unwrap();
            assert!(population.iter().any(|c| std::ptr::eq(c, selected)));
        }
    }

    #[test]
    fn test_tournament_selection_prefers_fitter() {
        let mut rng = StdRng::seed_from_u64(2);
        let population = create_population(100);
        let selection = TournamentSelection::new(5).unwrap();

        let trials = 1000;
        let total: f64 = (0..trials)
            .map(|_| selection.select(&population, &mut rng).unwrap().fitness())
            .sum();
        // uniform selection would average 49.5
        assert!(total / trials as f64 > 65.0);
    }

    #[test]
    fn test_tournament_selection_large_arity() {
        let mut rng = StdRng::seed_from_u64(3);
        let population = create_population(3);
        let selection = TournamentSelection::new(200).unwrap();

        // with replacement, the arity may exceed the population size
        let selected = selection.select(&population, &mut rng).unwrap();
        assert_eq!(selected.fitness(), 2.0);
    }

    #[test]
    fn test_tournament_selection_errors() {
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(
            TournamentSelection::new(0).unwrap_err(),
            GeneticError::NotStrictlyPositive {
                parameter: "tournament arity",
                value: 0
            }
        );

        let empty: Population<Integral> = Population::new(5).unwrap();
        assert_eq!(
            TournamentSelection::binary().select(&empty, &mut rng).unwrap_err(),
            GeneticError::EmptyPopulation
        );
    }

    #[test]
    fn test_select_pair() {
        let mut rng = StdRng::seed_from_u64(5);
        let population = create_population(10);
        let (first, second) = TournamentSelection::binary()
            .select_pair(&population, &mut rng)
            .unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }
}
